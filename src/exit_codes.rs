//! Exit code constants for the allrun CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid settings)
//! - 2: Template parse failure
//! - 3: Template resolution failure
//!
//! A failed wrapped step does not use these codes: `exec` and `run` exit with
//! the failing step's own status so the calling script sees it unchanged.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, or invalid settings.
pub const USER_ERROR: i32 = 1;

/// The template text is malformed.
pub const PARSE_FAILURE: i32 = 2;

/// A template reference could not be resolved against the configuration tree.
pub const RESOLUTION_FAILURE: i32 = 3;

/// The step's program could not be found (shell convention).
pub const COMMAND_NOT_FOUND: i32 = 127;

/// The step's program exists but could not be started (shell convention).
pub const COMMAND_NOT_EXECUTABLE: i32 = 126;

/// Base added to a signal number when a step is killed by a signal.
pub const SIGNAL_BASE: i32 = 128;
