//! Input validation for CLI arguments

use crate::config::{MAX_PARALLEL, MIN_PARALLEL};
use crate::error::{RepoSyncError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Effective worker count: the flag if given, else the configured value,
/// clamped to the supported range
pub fn resolve_parallelism(flag: Option<usize>, configured: usize) -> usize {
    let requested = flag.unwrap_or(configured);
    let clamped = requested.clamp(MIN_PARALLEL, MAX_PARALLEL);
    if clamped != requested {
        warn!(
            "Parallelism {} is outside {}..={}; using {}",
            requested, MIN_PARALLEL, MAX_PARALLEL, clamped
        );
    }
    clamped
}

/// Working root: `-C <dir>` if given, else the current directory
pub fn resolve_root(flag: Option<&Path>) -> Result<PathBuf> {
    let root = match flag {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|e| {
            RepoSyncError::config("Cannot determine the current directory").with_source(e)
        })?,
    };
    validate_directory(&root)?;
    Ok(root)
}

/// Validate that a directory exists
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RepoSyncError::config(format!(
            "Directory '{}' does not exist",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(RepoSyncError::config(format!(
            "Path '{}' is not a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Manifest path: relative paths are taken from the working root
pub fn resolve_manifest_path(root: &Path, manifest: &Path) -> PathBuf {
    if manifest.is_absolute() {
        manifest.to_path_buf()
    } else {
        root.join(manifest)
    }
}
