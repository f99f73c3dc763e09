//! File system utilities
//!
//! Directory creation, atomic writes, and modification-time helpers used by
//! the generator and the toolchain check.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gendeps::utils::fs::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("dist"))?;
//! atomic_write(Path::new("dist/deps.js"), b"goog.addDependency(...);\n")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use crate::core::GendepsError;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Creation is idempotent: an existing directory, including one created
/// concurrently by another process, is not an error.
///
/// # Errors
///
/// - [`GendepsError::DestinationNotDirectory`] if the path exists but is not a directory
/// - [`GendepsError::FileSystemError`] if creation fails for any other reason
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    if path.exists() {
        return Err(GendepsError::DestinationNotDirectory {
            path: path.display().to_string(),
        }
        .into());
    }

    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(anyhow::Error::new(e).context(GendepsError::FileSystemError {
            operation: "create directory".to_string(),
            path: path.display().to_string(),
        })),
    }
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Write content to a temporary file in the target's directory
/// 2. Sync the temporary file to disk
/// 3. Rename the temporary file over the target path
///
/// Readers see either the previous content or the new content, never a
/// partial write. The bytes are written verbatim. An existing file keeps its
/// permissions; a new file gets the usual `0644` on Unix rather than the
/// owner-only mode of the temporary file. The parent directory must
/// already exist; callers create it with [`ensure_dir`] so that failure is
/// reported on its own.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written,
/// synced, or renamed. The temporary file is removed on failure.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("gendeps");

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;

    if let Some(permissions) = target_permissions(path) {
        temp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions on: {}", temp.path().display()))?;
    }

    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Permissions the written file should end up with.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }

    #[cfg(not(unix))]
    {
        None
    }
}

/// Gets the modification time of a file.
///
/// # Errors
///
/// Returns an error if the file metadata cannot be read
pub fn get_modified_time(path: &Path) -> Result<SystemTime> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

    metadata
        .modified()
        .with_context(|| format!("Failed to get modification time for: {}", path.display()))
}

/// Returns `true` when `path` exists and was modified strictly after `reference`.
///
/// A missing `path` is never newer.
///
/// # Errors
///
/// Returns an error if an existing file's metadata cannot be read
pub fn is_newer_than(path: &Path, reference: SystemTime) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    Ok(get_modified_time(path)? > reference)
}

/// Creates an empty file or bumps the modification time of an existing one.
///
/// # Errors
///
/// Returns an error if the file cannot be created or its timestamp set
pub fn touch(path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    file.set_modified(SystemTime::now())
        .with_context(|| format!("Failed to set modification time for: {}", path.display()))?;
    Ok(())
}
