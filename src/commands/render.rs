//! Implementation of the `allrun render` command.

use super::render_template;
use crate::cli::RenderArgs;
use crate::config::Settings;
use crate::error::{AllrunError, Result};
use crate::fs::{atomic_write_executable, atomic_write_file};
use crate::tree::ConfigTree;
use std::io::Write;
use tracing::info;

/// Execute the `allrun render` command.
///
/// Nothing is written unless the whole template renders.
pub fn cmd_render(args: RenderArgs, settings: &Settings) -> Result<()> {
    let tree = ConfigTree::load(&args.config)?;
    let rendered = render_template(&args.template, settings, &tree)?;

    let Some(output) = args.output else {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(rendered.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| AllrunError::UserError(format!("failed to write to stdout: {}", e)));
    };

    let executable = output
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| settings.is_executable_output(name));

    if executable {
        atomic_write_executable(&output, &rendered)?;
    } else {
        atomic_write_file(&output, &rendered)?;
    }

    info!(
        template = %args.template.display(),
        output = %output.display(),
        executable,
        "rendered"
    );
    Ok(())
}
