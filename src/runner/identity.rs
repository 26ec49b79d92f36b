//! Log file naming for wrapped steps.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Default argv index of the target program for the built-in launchers.
pub const DEFAULT_LAUNCHER_TARGET: usize = 3;

/// Default log file prefix.
pub const DEFAULT_LOG_PREFIX: &str = "log.";

/// Built-in parallel launchers: `mpiexec` and `mpirun`, both at
/// [`DEFAULT_LAUNCHER_TARGET`].
pub fn default_launchers() -> BTreeMap<String, usize> {
    ["mpiexec", "mpirun"]
        .into_iter()
        .map(|name| (name.to_string(), DEFAULT_LAUNCHER_TARGET))
        .collect()
}

/// How a step's log file is named.
///
/// The identity of a step is the base name of its program with the
/// extension stripped. For a parallel launcher the identity comes from the
/// argument at the launcher's configured index instead, so
/// `mpiexec -np 4 simpleFoam -parallel` logs to `log.simpleFoam`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogNaming {
    pub prefix: String,
    pub launchers: BTreeMap<String, usize>,
}

impl Default for LogNaming {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LOG_PREFIX.to_string(),
            launchers: default_launchers(),
        }
    }
}

impl LogNaming {
    /// Derive the log identity of a command line.
    ///
    /// `argv` must not be empty.
    pub fn identity(&self, argv: &[String]) -> String {
        let Some(program) = argv.first() else {
            return String::new();
        };
        let program_stem = stem(program);

        match self.launchers.get(&program_stem) {
            Some(&index) => match argv.get(index) {
                Some(target) => stem(target),
                None => {
                    warn!(
                        launcher = %program_stem,
                        index,
                        args = argv.len(),
                        "launcher has no target program argument, logging under launcher name"
                    );
                    program_stem
                }
            },
            None => program_stem,
        }
    }

    /// The log file name for an identity, such as `log.simpleFoam`.
    pub fn file_name(&self, identity: &str) -> String {
        format!("{}{}", self.prefix, identity)
    }
}

fn stem(arg: &str) -> String {
    Path::new(arg)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg.to_string())
}
