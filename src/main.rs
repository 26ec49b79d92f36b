//! Allrun: render case scripts from directive templates and run their steps.
//!
//! This is the main entry point for the `allrun` CLI. It parses arguments,
//! sets up logging, loads settings, dispatches to the appropriate command
//! handler, and handles errors with proper exit codes.

use allrun::cli::Cli;
use allrun::commands;
use allrun::config::Settings;
use allrun::error::AllrunError;
use allrun::exit_codes;
use allrun::logging;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.log_level.as_deref(), cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code().clamp(0, 255) as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), AllrunError> {
    let settings = Settings::discover(cli.settings.as_deref(), Path::new("."))?;
    commands::dispatch(cli.command, &settings)
}
