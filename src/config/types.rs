//! Settings defaults for allrun.

use crate::runner::{DEFAULT_LOG_PREFIX, default_launchers};
use std::collections::BTreeMap;

/// Settings file looked up in the working directory when `--settings` is
/// not given.
pub const SETTINGS_FILE: &str = "allrun.yaml";

pub(crate) fn default_log_prefix() -> String {
    DEFAULT_LOG_PREFIX.to_string()
}

pub(crate) fn default_parallel_launchers() -> BTreeMap<String, usize> {
    default_launchers()
}

pub(crate) fn default_executable_outputs() -> Vec<String> {
    vec!["Allrun".to_string(), "Allmesh".to_string()]
}
