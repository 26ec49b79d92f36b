//! Implementation of the `allrun build` command.
//!
//! Renders a directory of templates (typically `Allmesh`, `Allrun` and the
//! `system/` dictionaries) into a case directory.
//!
//! # What `allrun build` does
//!
//! 1. Loads the configuration tree
//! 2. Collects every file under the template directory, in sorted order
//! 3. Renders all of them in memory; any failure aborts before writing
//! 4. Writes each file atomically under the same relative path in the case
//!    directory, marking scripts executable

mod plan;

#[cfg(test)]
mod tests;

use crate::cli::BuildArgs;
use crate::config::Settings;
use crate::error::{AllrunError, Result};
use crate::fs::{atomic_write_executable, atomic_write_file};
use crate::tree::ConfigTree;
use tracing::info;

use plan::*;

/// Execute the `allrun build` command.
pub fn cmd_build(args: BuildArgs, settings: &Settings) -> Result<()> {
    if !args.template_dir.is_dir() {
        return Err(AllrunError::UserError(format!(
            "template directory '{}' does not exist or is not a directory",
            args.template_dir.display()
        )));
    }

    let tree = ConfigTree::load(&args.config)?;
    let files = collect_templates(&args.template_dir, Some(&args.case_dir))?;
    if files.is_empty() {
        return Err(AllrunError::UserError(format!(
            "template directory '{}' contains no files",
            args.template_dir.display()
        )));
    }

    let planned = render_all(&args.template_dir, &files, settings, &tree)?;

    for file in &planned {
        let target = args.case_dir.join(&file.relative);
        if file.executable {
            atomic_write_executable(&target, &file.contents)?;
        } else {
            atomic_write_file(&target, &file.contents)?;
        }
    }

    info!(
        files = planned.len(),
        case = %args.case_dir.display(),
        "case built"
    );
    println!(
        "Built {} file(s) into {}",
        planned.len(),
        args.case_dir.display()
    );
    Ok(())
}
