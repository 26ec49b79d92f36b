//! Implementation of the `allrun exec` command.
//!
//! Runs a single step through the logging wrapper. Case scripts call this
//! once per step, so the exit status must be the step's own.

use crate::cli::ExecArgs;
use crate::config::Settings;
use crate::error::{AllrunError, Result};
use crate::runner::{Runner, Step};

/// Execute the `allrun exec` command.
pub fn cmd_exec(args: ExecArgs, settings: &Settings) -> Result<()> {
    let step = Step::new(args.command)?;
    let runner = Runner::new(args.case_dir, settings.log_naming());
    let outcome = runner.run_step(&step)?;

    if outcome.is_success() {
        Ok(())
    } else {
        Err(AllrunError::StepFailed {
            command: step.to_string(),
            log: outcome.log_path,
            status: outcome.status,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exec(case: &TempDir, command: &[&str]) -> Result<()> {
        cmd_exec(
            ExecArgs {
                case_dir: case.path().to_path_buf(),
                command: command.iter().map(|s| s.to_string()).collect(),
            },
            &Settings::default(),
        )
    }

    #[test]
    fn successful_step_writes_log() {
        let case = TempDir::new().unwrap();
        exec(&case, &["sh", "-c", "echo done"]).unwrap();

        let log = fs::read_to_string(case.path().join("log.sh")).unwrap();
        assert_eq!(log, "done\n");
    }

    #[test]
    fn failing_step_propagates_status() {
        let case = TempDir::new().unwrap();
        let err = exec(&case, &["sh", "-c", "exit 9"]).unwrap_err();

        assert_eq!(err.exit_code(), 9);
        match err {
            AllrunError::StepFailed { log, .. } => {
                assert_eq!(log, case.path().join("log.sh"));
            }
            other => panic!("expected StepFailed, got {:?}", other),
        }
    }

    #[test]
    fn custom_log_prefix_is_used() {
        let case = TempDir::new().unwrap();
        let settings = Settings {
            log_prefix: "run-".to_string(),
            ..Settings::default()
        };
        cmd_exec(
            ExecArgs {
                case_dir: case.path().to_path_buf(),
                command: vec!["true".to_string()],
            },
            &settings,
        )
        .unwrap();

        assert!(case.path().join("run-true").exists());
        assert!(!case.path().join("log.true").exists());
    }
}
