//! Command execution wrapper.
//!
//! Every step of a case script runs through [`run_step_with`]: its output is
//! shown to the caller and captured in `log.<identity>` in the case
//! directory. [`Runner`] runs an ordered list of steps and stops at the
//! first failure.

mod identity;
mod step;
mod wrapper;


pub use identity::{DEFAULT_LAUNCHER_TARGET, DEFAULT_LOG_PREFIX, LogNaming, default_launchers};
pub use step::{Step, parse_steps};
pub use wrapper::{StepOutcome, run_step_with};

use crate::error::{AllrunError, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Sequential, fail-fast step runner for one case directory.
#[derive(Debug, Clone)]
pub struct Runner {
    case_dir: PathBuf,
    naming: LogNaming,
}

impl Runner {
    pub fn new(case_dir: impl Into<PathBuf>, naming: LogNaming) -> Self {
        Self {
            case_dir: case_dir.into(),
            naming,
        }
    }

    pub fn case_dir(&self) -> &Path {
        &self.case_dir
    }

    /// Run one step against the process's own stdout and stderr.
    pub fn run_step(&self, step: &Step) -> Result<StepOutcome> {
        run_step_with(
            step,
            &self.case_dir,
            &self.naming,
            &mut io::stdout(),
            &mut io::stderr(),
        )
    }

    /// Run every step in order against the process's own streams.
    pub fn run_all(&self, steps: &[Step]) -> Result<Vec<StepOutcome>> {
        self.run_all_with(steps, &mut io::stdout(), &mut io::stderr())
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// A failed step yields [`AllrunError::StepFailed`] carrying its status;
    /// the steps after it never run.
    pub fn run_all_with<O, E>(
        &self,
        steps: &[Step],
        out: &mut O,
        err: &mut E,
    ) -> Result<Vec<StepOutcome>>
    where
        O: Write + Send + ?Sized,
        E: Write + Send + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(steps.len());
        for step in steps {
            let outcome = run_step_with(step, &self.case_dir, &self.naming, out, err)?;
            if !outcome.is_success() {
                return Err(AllrunError::StepFailed {
                    command: step.to_string(),
                    log: outcome.log_path,
                    status: outcome.status,
                });
            }
            outcomes.push(outcome);
        }
        info!(steps = outcomes.len(), "all steps finished");
        Ok(outcomes)
    }
}
