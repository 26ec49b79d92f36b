//! Filesystem utilities for allrun.
//!
//! Rendered case files are written atomically so a failed or interrupted
//! build never leaves a truncated script behind.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_executable;
pub use atomic::atomic_write_file;
pub use atomic::is_executable;
