//! Implementation of the `allrun run` command.

use crate::cli::RunArgs;
use crate::config::Settings;
use crate::error::{AllrunError, Result};
use crate::runner::{Runner, parse_steps};

/// Execute the `allrun run` command.
///
/// Steps run in file order; the first failure stops the run and becomes
/// the exit status.
pub fn cmd_run(args: RunArgs, settings: &Settings) -> Result<()> {
    let text = std::fs::read_to_string(&args.steps_file).map_err(|e| {
        AllrunError::UserError(format!(
            "failed to read steps file '{}': {}",
            args.steps_file.display(),
            e
        ))
    })?;

    let steps = parse_steps(&text).map_err(|e| {
        AllrunError::UserError(format!("{}: {}", args.steps_file.display(), e))
    })?;

    let runner = Runner::new(args.case_dir, settings.log_naming());
    runner.run_all(&steps)?;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::exit_codes;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn runs_steps_until_failure() {
        let case = TempDir::new().unwrap();
        let steps = case.path().join("steps");
        fs::write(
            &steps,
            "# mesh\nsh -c 'touch meshed'\nsh -c 'exit 3'\ntouch solved\n",
        )
        .unwrap();

        let err = cmd_run(
            RunArgs {
                steps_file: steps,
                case_dir: case.path().to_path_buf(),
            },
            &Settings::default(),
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(case.path().join("meshed").exists());
        assert!(!case.path().join("solved").exists());
    }

    #[test]
    fn unparsable_steps_file_runs_nothing() {
        let case = TempDir::new().unwrap();
        let steps = case.path().join("steps");
        fs::write(&steps, "touch first\necho 'unbalanced\n").unwrap();

        let err = cmd_run(
            RunArgs {
                steps_file: steps,
                case_dir: case.path().to_path_buf(),
            },
            &Settings::default(),
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("line 2"));
        assert!(!case.path().join("first").exists());
    }

    #[test]
    fn missing_steps_file_is_user_error() {
        let case = TempDir::new().unwrap();
        let err = cmd_run(
            RunArgs {
                steps_file: case.path().join("nope"),
                case_dir: case.path().to_path_buf(),
            },
            &Settings::default(),
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }
}
