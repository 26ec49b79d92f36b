//! Implementation of the `allrun check` command.
//!
//! Parses a template without rendering it, so template authors can catch
//! unbalanced blocks before a case is ever configured.

use super::{parse_template, read_template};
use crate::cli::CheckArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::template::DirectiveCounts;

/// Execute the `allrun check` command.
pub fn cmd_check(args: CheckArgs, settings: &Settings) -> Result<()> {
    let text = read_template(&args.template)?;
    let template = parse_template(&args.template, &text, settings)?;
    let counts = template.document().counts();

    println!("{}: ok ({})", args.template.display(), summarize(&counts));
    Ok(())
}

fn summarize(counts: &DirectiveCounts) -> String {
    format!(
        "{} references, {} blocks, {} branches, max depth {}",
        counts.references, counts.blocks, counts.branches, counts.max_depth
    )
}
