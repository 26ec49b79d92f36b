//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through a `tracing-subscriber` fmt layer. The
//! default level is `warn` so wrapped step output is not interleaved with
//! chatter; `RUST_LOG` overrides everything.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive from `--log-level` and the `-v` count.
///
/// An explicit level wins. Otherwise `-v` gives `info` and `-vv` or more
/// gives `debug`.
pub fn effective_level(explicit: Option<&str>, verbose: u8) -> &str {
    match (explicit, verbose) {
        (Some(level), _) => level,
        (None, 0) => "warn",
        (None, 1) => "info",
        (None, _) => "debug",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(explicit: Option<&str>, verbose: u8) {
    let level = effective_level(explicit, verbose);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        debug!("logging initialized with level: {}", level);
    }
}
