//! Command implementations for allrun.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the template loading shared by `render`, `build`
//! and `check`.

mod build;
mod check;
mod exec;
mod render;
mod run;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::{AllrunError, Result};
use crate::template::Template;
use crate::tree::ConfigTree;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Render(args) => render::cmd_render(args, settings),
        Command::Build(args) => build::cmd_build(args, settings),
        Command::Check(args) => check::cmd_check(args, settings),
        Command::Exec(args) => exec::cmd_exec(args, settings),
        Command::Run(args) => run::cmd_run(args, settings),
    }
}

/// Read a template file as UTF-8 text.
fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        AllrunError::UserError(format!(
            "failed to read template '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Parse template text, attaching file/line/column to any error.
fn parse_template(path: &Path, text: &str, settings: &Settings) -> Result<Template> {
    Template::parse_with(text, &settings.syntax)
        .map_err(|e| AllrunError::parse_failure(path, text, e))
}

/// Parse and render one template file.
fn render_template(path: &Path, settings: &Settings, tree: &ConfigTree) -> Result<String> {
    let text = read_template(path)?;
    let template = parse_template(path, &text, settings)?;
    template
        .render(tree)
        .map_err(|e| AllrunError::resolve_failure(path, e))
}
