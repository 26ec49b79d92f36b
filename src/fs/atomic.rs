//! Atomic file writes for rendered case files.
//!
//! A rendered script is never observable half-written: content goes to a
//! temporary file in the same directory, is synced, given its final
//! permissions, and then renamed over the target.
//!
//! On crash a temporary file may remain, named `.{filename}.tmp`.

use crate::error::{AllrunError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file.
///
/// Missing parent directories are created. If the target already exists its
/// permissions carry over to the new content.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    write_with_mode(path.as_ref(), content, false)
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically write a script and mark it executable.
///
/// The execute bit is added for every class that can read the file.
/// On non-unix platforms this is the same as [`atomic_write_file`].
pub fn atomic_write_executable<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    write_with_mode(path.as_ref(), content.as_bytes(), true)
}

fn write_with_mode(path: &Path, content: &[u8], executable: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            AllrunError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;

    if let Err(e) = apply_permissions(&temp_path, path, executable) {
        let _ = fs::remove_file(&temp_path);
        return Err(AllrunError::UserError(format!(
            "failed to set permissions on '{}': {}",
            path.display(),
            e
        )));
    }

    atomic_replace(&temp_path, path)
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AllrunError::UserError(format!("invalid output path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        AllrunError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        AllrunError::UserError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        AllrunError::UserError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

#[cfg(unix)]
fn apply_permissions(temp: &Path, target: &Path, executable: bool) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = match fs::metadata(target) {
        Ok(meta) => meta.permissions(),
        Err(_) => fs::metadata(temp)?.permissions(),
    };
    if executable {
        // x for every class that has r
        let mode = perms.mode();
        perms.set_mode(mode | ((mode & 0o444) >> 2));
    }
    fs::set_permissions(temp, perms)
}

#[cfg(not(unix))]
fn apply_permissions(temp: &Path, target: &Path, _executable: bool) -> std::io::Result<()> {
    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(temp, meta.permissions())?;
    }
    Ok(())
}

/// Rename the temporary file over the target.
///
/// `rename` replaces an existing destination on every supported platform.
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        AllrunError::UserError(format!(
            "failed to atomically replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Whether the file at `path` carries any execute bit.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
