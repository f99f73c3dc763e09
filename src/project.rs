//! Locating the project base directory.
//!
//! The base directory is the root of the JavaScript project: the directory
//! holding `package.json`, `node_modules/`, and the source roots. The
//! dependency writer runs there and the manifest is written below it.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::constants::PACKAGE_JSON;
use crate::core::GendepsError;

/// Finds the project base by walking up from `start` to the first directory
/// containing `package.json`.
///
/// # Errors
///
/// Returns [`GendepsError::ProjectRootNotFound`] if no ancestor has a
/// `package.json`.
pub fn find_source_base(start: &Path) -> Result<PathBuf> {
    let mut current = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    loop {
        if current.join(PACKAGE_JSON).is_file() {
            tracing::debug!("Found project base at {}", current.display());
            return Ok(current);
        }

        if !current.pop() {
            return Err(GendepsError::ProjectRootNotFound {
                start: start.display().to_string(),
            }
            .into());
        }
    }
}

/// Resolves the base directory from an explicit `--base` flag or by
/// discovery from the current directory.
///
/// An explicit directory is used as given (canonicalized) without requiring
/// a `package.json`; readiness checks report anything missing.
///
/// # Errors
///
/// Returns an error if the explicit directory does not exist, the current
/// directory cannot be read, or discovery fails.
pub fn resolve_source_base(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(base) = explicit {
        if !base.is_dir() {
            return Err(GendepsError::ProjectRootNotFound {
                start: base.display().to_string(),
            }
            .into());
        }
        return Ok(base.canonicalize().unwrap_or_else(|_| base.to_path_buf()));
    }

    let cwd = std::env::current_dir().map_err(|e| GendepsError::FileSystemError {
        operation: format!("read current directory ({e})"),
        path: ".".to_string(),
    })?;
    find_source_base(&cwd)
}
