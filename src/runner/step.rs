//! Step command lines.

use crate::error::{AllrunError, Result};
use std::fmt;

/// One command to run through the wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    argv: Vec<String>,
}

impl Step {
    /// Build a step from an argument vector. The vector must not be empty.
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.is_empty() || argv[0].is_empty() {
            return Err(AllrunError::UserError("command is empty".to_string()));
        }
        Ok(Self { argv })
    }

    /// Parse a shell-word command line. Quotes and escapes are honored; no
    /// other shell syntax is interpreted.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let argv = shell_words::split(line).map_err(|e| {
            AllrunError::UserError(format!(
                "failed to parse command: {}\nCommand: {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                e, line
            ))
        })?;
        Self::new(argv)
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_words::join(&self.argv))
    }
}

/// Parse a steps file: one command per line, blank lines and `#` comments
/// skipped.
pub fn parse_steps(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = Step::parse(trimmed).map_err(|e| {
            AllrunError::UserError(format!("line {}: {}", index + 1, e))
        })?;
        steps.push(step);
    }
    Ok(steps)
}
