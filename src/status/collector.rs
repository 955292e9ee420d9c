//! Per-repository status collection
//!
//! Issues a fixed sequence of read-only git queries in one checkout. Any
//! single query failing leaves its field empty; it never aborts the row.

use super::{StatusRow, SyncState};
use crate::git::{abbreviate, GitError, GitReader, GitResult, HeadRef};
use crate::manifest::{checkout_path, Repository};
use std::path::Path;
use tracing::{debug, warn};

/// Collect the status of one repository under `root`.
///
/// Returns `None` when the checkout directory does not exist yet.
pub async fn collect(repo: &Repository, root: &Path, git: &dyn GitReader) -> Option<StatusRow> {
    let path = checkout_path(root, repo);
    if !path.exists() {
        debug!("Skipping {}: not checked out", path.display());
        return None;
    }

    let name = repo.dir_name();

    let head = recover(&name, "current branch", git.current_branch(&path).await);
    let detached = head.as_ref().is_some_and(HeadRef::is_detached);
    let short_hash = recover(&name, "short hash", git.short_hash(&path).await).unwrap_or_default();
    let local_ref = compose_local_ref(head.as_ref().map(HeadRef::as_str), &short_hash);

    let local_hash = recover(&name, "HEAD hash", git.head_hash(&path).await)
        .map(|commit| commit.hash().to_string())
        .unwrap_or_default();

    let branch = head.as_ref().and_then(HeadRef::branch).map(str::to_string);
    let remote_hash = match branch.as_deref() {
        Some(branch) => recover(&name, "remote hash", git.remote_hash(&path, branch).await)
            .flatten()
            .map(|commit| commit.hash().to_string())
            .unwrap_or_default(),
        None => String::new(),
    };

    let ahead = match branch.as_deref() {
        Some(branch)
            if !local_hash.is_empty() && !remote_hash.is_empty() && local_hash != remote_hash =>
        {
            count_ahead(git, &path, &name, branch, &remote_hash, &local_hash).await
        }
        _ => Ahead::NotCompared,
    };

    let state = classify(detached, &remote_hash, ahead);
    debug!("{}: {} (local {}, remote {})", name, state, local_ref, remote_hash);

    Some(StatusRow {
        name,
        config_ref: repo.config_ref(),
        local_ref,
        remote_ref: abbreviate(&remote_hash).to_string(),
        state,
        path,
        branch,
        detached,
        local_hash,
        remote_hash,
    })
}

/// Local commits the remote branch lacks, as far as the checkout can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ahead {
    /// Hashes match, or there is no remote commit to compare against
    NotCompared,
    Counted(u64),
    /// Neither the remote commit nor the tracking ref could be compared
    Unknown,
}

/// Count `remote..local`; when the remote commit has not been fetched,
/// count against the last known `origin/<branch>` instead.
async fn count_ahead(
    git: &dyn GitReader,
    path: &Path,
    name: &str,
    branch: &str,
    remote_hash: &str,
    local_hash: &str,
) -> Ahead {
    match git.count_commits(path, remote_hash, local_hash).await {
        Ok(count) => return Ahead::Counted(count),
        Err(GitError::UnknownRevision(detail)) => {
            debug!("{}: remote commit not fetched yet ({})", name, detail);
        }
        Err(e) => warn!("{}: could not read unpushed commit count: {}", name, e),
    }

    let tracking = format!("refs/remotes/origin/{branch}");
    match git.count_commits(path, &tracking, "HEAD").await {
        Ok(count) => Ahead::Counted(count),
        Err(e) => {
            debug!("{}: no usable {}: {}", name, tracking, e);
            Ahead::Unknown
        }
    }
}

/// Base classification: only `Clean` or `Unpushed`.
pub fn classify(detached: bool, remote_hash: &str, ahead: Ahead) -> SyncState {
    match ahead {
        Ahead::Counted(count) if count > 0 => SyncState::Unpushed,
        Ahead::Unknown => SyncState::Unpushed,
        _ if !detached && remote_hash.is_empty() => SyncState::Unpushed,
        _ => SyncState::Clean,
    }
}

/// `branch/shortHash` when both are known, else whichever is
pub fn compose_local_ref(branch: Option<&str>, short_hash: &str) -> String {
    match (branch.filter(|b| !b.is_empty()), short_hash) {
        (Some(branch), "") => branch.to_string(),
        (Some(branch), hash) => format!("{branch}/{hash}"),
        (None, hash) => hash.to_string(),
    }
}

fn recover<T>(name: &str, what: &str, result: GitResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}: could not read {}: {}", name, what, e);
            None
        }
    }
}
