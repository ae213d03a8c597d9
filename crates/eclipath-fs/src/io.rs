//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Result of [`copy_if_newer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination was missing or older and has been replaced
    Copied,
    /// The destination was already up to date
    UpToDate,
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock on the temp file while writing.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_path = native_path.with_file_name(temp_name(&native_path));

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

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

/// Copy `source` to `dest` unless `dest` already exists and is not older.
///
/// The copy goes through a temp file and a rename, and the source's
/// modification time is carried over so later comparisons stay stable.
pub fn copy_if_newer(source: &Path, dest: &NormalizedPath) -> Result<CopyOutcome> {
    let source_modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(source, e))?;

    let native_dest = dest.to_native();
    if let Ok(dest_modified) = fs::metadata(&native_dest).and_then(|m| m.modified()) {
        if dest_modified >= source_modified {
            return Ok(CopyOutcome::UpToDate);
        }
    }

    if let Some(parent) = native_dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = native_dest.with_file_name(temp_name(&native_dest));
    let placed = copy_to_temp(source, &temp_path, source_modified).and_then(|()| {
        fs::rename(&temp_path, &native_dest).map_err(|e| Error::io(&native_dest, e))
    });
    if let Err(e) = placed {
        discard_temp(&temp_path);
        return Err(e);
    }
    tracing::debug!(source = %source.display(), dest = %dest, "Copied file");

    Ok(CopyOutcome::Copied)
}

fn copy_to_temp(source: &Path, temp_path: &Path, modified: SystemTime) -> Result<()> {
    fs::copy(source, temp_path).map_err(|e| Error::io(temp_path, e))?;
    let copied = File::options()
        .write(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;
    copied
        .set_modified(modified)
        .map_err(|e| Error::io(temp_path, e))
}

fn discard_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file")
        }
    }
}

/// Create an empty file (and its parent directories) if it does not exist.
pub fn touch(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;
    Ok(())
}

/// Remove a file, returning `false` when it did not exist.
pub fn remove_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

fn temp_name(native_path: &Path) -> String {
    format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    )
}
