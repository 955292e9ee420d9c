//! Checkout directory resolution
//!
//! Maps a manifest entry to the directory name it is cloned into. The result
//! is used as a map key across commands, so it must be a pure function of the
//! entry.

use super::Repository;
use std::path::{Path, PathBuf};

/// Directory name for a repository: the explicit id, else the URL basename.
pub fn resolve_dir_name(repo: &Repository) -> String {
    match repo.id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => dir_name_from_url(&repo.url),
    }
}

/// Last path segment of a clone URL without a trailing `.git`.
///
/// Handles `https://host/org/repo.git`, `https://host/org/repo/` and
/// scp-style `git@host:org/repo.git` (and `git@host:repo.git`).
pub fn dir_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    // `:` only separates host from path in scp-style URLs without a `/`
    let last = match trimmed.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => trimmed.rsplit_once(':').map_or(trimmed, |(_, segment)| segment),
    };
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Absolute or root-relative checkout path for a repository
pub fn checkout_path(root: &Path, repo: &Repository) -> PathBuf {
    root.join(resolve_dir_name(repo))
}
