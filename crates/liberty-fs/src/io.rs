//! Atomic I/O operations with file locking
//!
//! Every generated server artifact is fully regenerated on each run, so
//! writes replace the target in one step and never append.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Missing parent directories are created first.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    write_atomic_native(&path.to_native(), content)
}

fn write_atomic_native(native_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = native_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, native_path).map_err(|e| Error::io(native_path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy a single file over `to`, replacing whatever is there.
pub fn copy_file(from: &NormalizedPath, to: &NormalizedPath) -> Result<()> {
    let source = from.to_native();
    let bytes = fs::read(&source).map_err(|e| Error::io(&source, e))?;
    tracing::debug!(from = %from, to = %to, "Copying file");
    write_atomic(to, &bytes)
}

/// Recursively copy the contents of `from` into `to`, overwriting files
/// that already exist. Returns the number of files copied.
///
/// Entries are visited in name order. Symlinked files are copied by
/// content; symlinked directories are not descended into.
pub fn copy_dir_all(from: &NormalizedPath, to: &NormalizedPath) -> Result<usize> {
    copy_dir_native(&from.to_native(), &to.to_native())
}

fn copy_dir_native(source: &Path, target: &Path) -> Result<usize> {
    let entries = fs::read_dir(source).map_err(|e| Error::io(source, e))?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(source, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        children.push((entry.file_name(), entry.path(), file_type));
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));

    let mut copied = 0;
    for (name, child_from, file_type) in children {
        let child_to = target.join(&name);
        if file_type.is_dir() {
            copied += copy_dir_native(&child_from, &child_to)?;
        } else if file_type.is_symlink() && child_from.is_dir() {
            tracing::debug!(path = %child_from.display(), "Skipping symlinked directory");
        } else {
            let bytes = fs::read(&child_from).map_err(|e| Error::io(&child_from, e))?;
            write_atomic_native(&child_to, &bytes)?;
            copied += 1;
        }
    }

    Ok(copied)
}
