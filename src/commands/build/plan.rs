//! Template directory discovery and in-memory rendering.

use crate::commands::render_template;
use crate::config::Settings;
use crate::error::{AllrunError, Result};
use crate::fs::is_executable;
use crate::tree::ConfigTree;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to both the template and the case directory.
    pub relative: PathBuf,
    pub contents: String,
    pub executable: bool,
}

/// List every file under `root`, relative to it, in sorted order.
///
/// `skip` names a directory to leave out, used when the case directory
/// lives inside the template directory.
pub fn collect_templates(root: &Path, skip: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root, Path::new(""), skip, &mut files)?;
    Ok(files)
}

fn walk(root: &Path, relative: &Path, skip: Option<&Path>, files: &mut Vec<PathBuf>) -> Result<()> {
    let dir = root.join(relative);
    let entries = fs::read_dir(&dir).map_err(|e| {
        AllrunError::UserError(format!(
            "failed to read template directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AllrunError::UserError(format!(
                "failed to read template directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        names.push(entry.file_name());
    }
    names.sort();

    for name in names {
        let rel = relative.join(&name);
        let full = root.join(&rel);

        if full.is_dir() {
            if let Some(skip) = skip
                && same_path(&full, skip)
            {
                debug!(dir = %full.display(), "skipping case directory inside templates");
                continue;
            }
            walk(root, &rel, skip, files)?;
        } else if full.is_file() {
            files.push(rel);
        }
    }
    Ok(())
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Render every template, stopping at the first failure.
pub fn render_all(
    root: &Path,
    files: &[PathBuf],
    settings: &Settings,
    tree: &ConfigTree,
) -> Result<Vec<PlannedFile>> {
    files
        .iter()
        .map(|relative| {
            let source = root.join(relative);
            let contents = render_template(&source, settings, tree)?;
            let executable = is_executable(&source)
                || relative
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| settings.is_executable_output(name));
            debug!(file = %relative.display(), executable, "rendered");
            Ok(PlannedFile {
                relative: relative.clone(),
                contents,
                executable,
            })
        })
        .collect()
}
