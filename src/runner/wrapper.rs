//! Logged execution of a single step.
//!
//! The child's stdout and stderr are each copied to the caller's matching
//! stream and appended to one shared log file in the case directory.

use super::identity::LogNaming;
use super::step::Step;
use crate::error::{AllrunError, Result};
use crate::exit_codes;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of running one step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Log identity, such as `simpleFoam`.
    pub identity: String,
    /// Path of the step's log file.
    pub log_path: PathBuf,
    /// Exit status using shell conventions.
    pub status: i32,
    pub duration: Duration,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        self.status == exit_codes::SUCCESS
    }
}

/// Run `step` in `case_dir`, teeing its output to `out`/`err` and to the
/// step's log file.
///
/// A stale log with the same identity is removed first. The child inherits
/// stdin, as it would when run directly from the case script. Spawn failures are
/// reported through the returned status (127 or 126), not as an error;
/// `Err` means the log could not be prepared.
pub fn run_step_with<O, E>(
    step: &Step,
    case_dir: &Path,
    naming: &LogNaming,
    out: &mut O,
    err: &mut E,
) -> Result<StepOutcome>
where
    O: Write + Send + ?Sized,
    E: Write + Send + ?Sized,
{
    if !case_dir.is_dir() {
        return Err(AllrunError::UserError(format!(
            "case directory '{}' does not exist",
            case_dir.display()
        )));
    }

    let identity = naming.identity(step.argv());
    let log_path = case_dir.join(naming.file_name(&identity));
    let log = Mutex::new(open_fresh_log(&log_path)?);

    info!(step = %step, log = %log_path.display(), "running step");
    let start = Instant::now();

    let spawned = Command::new(step.program())
        .args(step.args())
        .current_dir(case_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            let status = spawn_failure_status(&e);
            let message = format!(
                "failed to execute '{}': {}\nFix: ensure the command is installed and in PATH.\n",
                step.program(),
                e
            );
            let _ = err.write_all(message.as_bytes());
            let _ = err.flush();
            write_log(&log, message.as_bytes(), &log_path);
            warn!(step = %step, status, "step could not be started");
            return Ok(StepOutcome {
                identity,
                log_path,
                status,
                duration: start.elapsed(),
            });
        }
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (out_result, err_result) = std::thread::scope(|scope| {
        let out_pump = scope.spawn(|| match stdout {
            Some(source) => pump(source, out, &log),
            None => Ok(()),
        });
        let err_pump = scope.spawn(|| match stderr {
            Some(source) => pump(source, err, &log),
            None => Ok(()),
        });
        (join_pump(out_pump.join()), join_pump(err_pump.join()))
    });

    for (stream, result) in [("stdout", out_result), ("stderr", err_result)] {
        if let Err(e) = result {
            warn!(stream, error = %e, "output copy incomplete");
        }
    }

    let status = child.wait().map_err(|e| {
        AllrunError::UserError(format!(
            "failed to wait for '{}': {}",
            step.program(),
            e
        ))
    })?;
    let status = status_code(status);
    let duration = start.elapsed();

    if status == exit_codes::SUCCESS {
        info!(step = %step, elapsed_ms = duration.as_millis() as u64, "step finished");
    } else {
        warn!(step = %step, status, "step failed");
    }

    Ok(StepOutcome {
        identity,
        log_path,
        status,
        duration,
    })
}

/// Remove any previous log and open a new one for appending.
fn open_fresh_log(path: &Path) -> Result<File> {
    match fs::remove_file(path) {
        Ok(()) => debug!(log = %path.display(), "removed previous log"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(AllrunError::UserError(format!(
                "failed to remove previous log '{}': {}",
                path.display(),
                e
            )));
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AllrunError::UserError(format!(
                "failed to open log file '{}': {}",
                path.display(),
                e
            ))
        })
}

/// Copy `source` to `sink` and the shared log until end of stream.
///
/// Write failures do not stop the copy, so the child never blocks on a full
/// pipe. The first failure is returned once the source is drained.
fn pump<R, W>(mut source: R, sink: &mut W, log: &Mutex<File>) -> io::Result<()>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut buf = [0u8; 8192];
    let mut first_error: Option<io::Error> = None;

    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                first_error.get_or_insert(e);
                break;
            }
        };
        let chunk = &buf[..n];

        if let Err(e) = sink.write_all(chunk).and_then(|()| sink.flush()) {
            first_error.get_or_insert(e);
        }

        let mut file = log.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = file.write_all(chunk) {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn join_pump(joined: std::thread::Result<io::Result<()>>) -> io::Result<()> {
    joined.unwrap_or_else(|_| Err(io::Error::other("output thread panicked")))
}

fn write_log(log: &Mutex<File>, bytes: &[u8], path: &Path) {
    let mut file = log.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(e) = file.write_all(bytes) {
        warn!(log = %path.display(), error = %e, "failed to write log");
    }
}

fn spawn_failure_status(error: &io::Error) -> i32 {
    if error.kind() == io::ErrorKind::NotFound {
        exit_codes::COMMAND_NOT_FOUND
    } else {
        exit_codes::COMMAND_NOT_EXECUTABLE
    }
}

#[cfg(unix)]
fn status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => exit_codes::SIGNAL_BASE + signal,
        (None, None) => exit_codes::USER_ERROR,
    }
}

#[cfg(not(unix))]
fn status_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(exit_codes::USER_ERROR)
}
