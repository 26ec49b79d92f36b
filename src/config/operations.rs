//! Settings loading, validation, and utility operations.

use super::model::Settings;
use super::types::SETTINGS_FILE;
use crate::error::{AllrunError, Result};
use crate::runner::LogNaming;
use std::path::Path;
use tracing::debug;

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AllrunError::UserError(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string. An empty document yields defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = if yaml.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                AllrunError::UserError(format!("failed to parse settings YAML: {}", e))
            })?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Resolve the settings for this invocation.
    ///
    /// An explicit path must exist. Without one, `allrun.yaml` in `dir` is
    /// used when present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(settings = %path.display(), "loading settings");
            return Self::load(path);
        }

        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            debug!(settings = %candidate.display(), "loading settings");
            Self::load(&candidate)
        } else {
            debug!("no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate settings values and return error on invalid values.
    ///
    /// Validation rules:
    /// - markers must be non-empty, distinct, and none may be a prefix of another
    /// - `separators` must be non-empty and must not contain whitespace
    /// - `log_prefix` must be non-empty and must not contain a path separator
    /// - launcher target indices must be at least 1
    pub fn validate(&self) -> Result<()> {
        let markers = self.syntax.markers();

        for (name, marker) in &markers {
            if marker.is_empty() {
                return Err(invalid(format!("syntax.{} must be non-empty", name)));
            }
        }

        for (i, (name_a, a)) in markers.iter().enumerate() {
            for (name_b, b) in &markers[i + 1..] {
                if a == b {
                    return Err(invalid(format!(
                        "syntax.{} and syntax.{} are both '{}'",
                        name_a, name_b, a
                    )));
                }
                if a.starts_with(*b) || b.starts_with(*a) {
                    return Err(invalid(format!(
                        "syntax.{} ('{}') and syntax.{} ('{}') overlap; one is a prefix of the other",
                        name_a, a, name_b, b
                    )));
                }
            }
        }

        if self.syntax.separators.is_empty() {
            return Err(invalid("syntax.separators must be non-empty".to_string()));
        }
        if self.syntax.separators.chars().any(char::is_whitespace) {
            return Err(invalid(
                "syntax.separators must not contain whitespace".to_string(),
            ));
        }

        if self.log_prefix.is_empty() {
            return Err(invalid("log_prefix must be non-empty".to_string()));
        }
        if self.log_prefix.contains(['/', '\\']) {
            return Err(invalid(format!(
                "log_prefix must be a file name prefix, not a path (found '{}')",
                self.log_prefix
            )));
        }

        for (launcher, &index) in &self.parallel_launchers {
            if index == 0 {
                return Err(invalid(format!(
                    "parallel_launchers.{} must be at least 1 (index 0 is the launcher itself)",
                    launcher
                )));
            }
        }

        Ok(())
    }

    /// Log naming rules for the command wrapper.
    pub fn log_naming(&self) -> LogNaming {
        LogNaming {
            prefix: self.log_prefix.clone(),
            launchers: self.parallel_launchers.clone(),
        }
    }

    /// Whether a rendered file with this name should be marked executable.
    pub fn is_executable_output(&self, file_name: &str) -> bool {
        self.executable_outputs.iter().any(|name| name == file_name)
    }
}

fn invalid(message: String) -> AllrunError {
    AllrunError::UserError(format!("settings validation failed: {}", message))
}
