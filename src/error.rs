//! Error types for the allrun CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::template::{ParseError, ResolveError, line_col};
use crate::tree::TreeError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for allrun operations.
///
/// Each variant maps to a process exit code; a failed step maps to the
/// step's own status.
#[derive(Error, Debug)]
pub enum AllrunError {
    /// User provided invalid arguments or inputs could not be read or written.
    #[error("{0}")]
    UserError(String),

    /// The configuration tree could not be loaded.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A template is malformed.
    #[error("{file}:{line}:{column}: {source}")]
    TemplateParse {
        file: String,
        line: usize,
        column: usize,
        #[source]
        source: ParseError,
    },

    /// A template references something the configuration tree does not hold.
    #[error("{file}: {source}")]
    TemplateResolve {
        file: String,
        #[source]
        source: ResolveError,
    },

    /// A wrapped command exited with a non-zero status.
    #[error("step '{command}' failed with exit status {status} (log: {})", .log.display())]
    StepFailed {
        command: String,
        log: PathBuf,
        status: i32,
    },
}

impl AllrunError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AllrunError::UserError(_) => exit_codes::USER_ERROR,
            AllrunError::Tree(_) => exit_codes::USER_ERROR,
            AllrunError::TemplateParse { .. } => exit_codes::PARSE_FAILURE,
            AllrunError::TemplateResolve { .. } => exit_codes::RESOLUTION_FAILURE,
            AllrunError::StepFailed { status, .. } => *status,
        }
    }

    /// Wrap a parse error with the file name and line/column of its offset.
    pub fn parse_failure(file: &Path, text: &str, source: ParseError) -> Self {
        let (line, column) = line_col(text, source.offset());
        AllrunError::TemplateParse {
            file: file.display().to_string(),
            line,
            column,
            source,
        }
    }

    pub fn resolve_failure(file: &Path, source: ResolveError) -> Self {
        AllrunError::TemplateResolve {
            file: file.display().to_string(),
            source,
        }
    }
}

/// Result type alias for allrun operations.
pub type Result<T> = std::result::Result<T, AllrunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = AllrunError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn tree_error_has_correct_exit_code() {
        let err = AllrunError::from(TreeError::NotAMapping { found: "list" });
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn parse_error_has_location() {
        let text = "line one\n  %(oops\n";
        let err = AllrunError::parse_failure(
            Path::new("Allrun"),
            text,
            ParseError::UnterminatedDirective { offset: 11 },
        );
        assert_eq!(err.exit_code(), exit_codes::PARSE_FAILURE);
        assert_eq!(
            err.to_string(),
            "Allrun:2:3: unterminated directive starting at offset 11"
        );
    }

    #[test]
    fn resolve_error_has_correct_exit_code() {
        let err = AllrunError::resolve_failure(
            Path::new("Allrun"),
            ResolveError::UnresolvedPath {
                path: "Solver".to_string(),
            },
        );
        assert_eq!(err.exit_code(), exit_codes::RESOLUTION_FAILURE);
        assert_eq!(err.to_string(), "Allrun: unresolved path 'Solver'");
    }

    #[test]
    fn step_failure_propagates_status() {
        let err = AllrunError::StepFailed {
            command: "simpleFoam -parallel".to_string(),
            log: PathBuf::from("case/log.simpleFoam"),
            status: 42,
        };
        assert_eq!(err.exit_code(), 42);
        assert_eq!(
            err.to_string(),
            "step 'simpleFoam -parallel' failed with exit status 42 (log: case/log.simpleFoam)"
        );
    }
}
