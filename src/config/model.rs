//! Settings struct definition and default implementation.

use super::types::*;
use crate::template::Syntax;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tool settings for allrun.
///
/// This struct represents the contents of `allrun.yaml`. Unknown fields in
/// the YAML are ignored for forward compatibility, and every field has a
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directive markers and path separators used when parsing templates.
    pub syntax: Syntax,

    /// Prefix of step log files (default: "log.").
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,

    /// Parallel launchers, mapped to the argv index of the program they
    /// launch. Index 0 is the launcher itself.
    #[serde(default = "default_parallel_launchers")]
    pub parallel_launchers: BTreeMap<String, usize>,

    /// Output file names that are marked executable when rendered.
    #[serde(default = "default_executable_outputs")]
    pub executable_outputs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            syntax: Syntax::default(),
            log_prefix: default_log_prefix(),
            parallel_launchers: default_parallel_launchers(),
            executable_outputs: default_executable_outputs(),
        }
    }
}
