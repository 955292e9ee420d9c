//! Git operation error types

use crate::error::{ErrorCode, RepoSyncError};
use thiserror::Error;

/// Git-specific errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Uncommitted changes present")]
    UncommittedChanges,

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Push rejected: {0}")]
    PushRejected(String),

    #[error("Git executable unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected git output: {0}")]
    UnexpectedOutput(String),

    #[error("Unknown revision: {0}")]
    UnknownRevision(String),
}

impl GitError {
    /// Classify a failed command from its stderr
    pub fn from_stderr(operation: &str, stderr: &str) -> Self {
        let detail = stderr.trim();
        if detail.contains("not a git repository") {
            GitError::NotARepository
        } else if detail.contains("Authentication failed")
            || detail.contains("could not read Username")
            || detail.contains("Permission denied (publickey)")
        {
            GitError::AuthenticationFailed
        } else if detail.contains("'origin' does not appear to be a git repository")
            || detail.contains("No such remote")
        {
            GitError::RemoteNotFound("origin".to_string())
        } else if detail.contains("would be overwritten")
            || detail.contains("uncommitted changes")
            || detail.contains("Please commit your changes or stash them")
        {
            GitError::UncommittedChanges
        } else if detail.contains("Invalid revision range")
            || detail.contains("unknown revision")
            || detail.contains("bad revision")
            || detail.contains("bad object")
        {
            GitError::UnknownRevision(detail.lines().next().unwrap_or(detail).to_string())
        } else if detail.is_empty() {
            GitError::CommandFailed(format!("git {operation} failed"))
        } else {
            GitError::CommandFailed(format!("git {operation} failed: {detail}"))
        }
    }
}

/// Convert GitError to RepoSyncError
impl From<GitError> for RepoSyncError {
    fn from(err: GitError) -> Self {
        let (code, operation) = match &err {
            GitError::NotARepository => (ErrorCode::GIT_NOT_REPO, "repository check"),
            GitError::BranchNotFound(_) => (ErrorCode::GIT_BRANCH_NOT_FOUND, "branch lookup"),
            GitError::UncommittedChanges => (ErrorCode::GIT_UNCOMMITTED, "checkout"),
            GitError::CommandFailed(_) => (ErrorCode::GIT_COMMAND_FAILED, "command execution"),
            GitError::RemoteNotFound(_) => (ErrorCode::GIT_REMOTE_NOT_FOUND, "remote lookup"),
            GitError::AuthenticationFailed => (ErrorCode::GIT_AUTH_FAILED, "authentication"),
            GitError::PushRejected(_) => (ErrorCode::GIT_PUSH_REJECTED, "push"),
            GitError::Unavailable(_) => (ErrorCode::GIT_UNAVAILABLE, "preflight"),
            GitError::UnexpectedOutput(_) => (ErrorCode::GIT_GENERIC, "output parsing"),
            GitError::UnknownRevision(_) => (ErrorCode::GIT_COMMAND_FAILED, "revision lookup"),
        };

        RepoSyncError::git(code, err.to_string(), operation).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stderr_classification() {
        assert_eq!(
            GitError::from_stderr("status", "fatal: not a git repository (or any parent)"),
            GitError::NotARepository
        );
        assert_eq!(
            GitError::from_stderr("push", "fatal: Authentication failed for 'https://x/y'"),
            GitError::AuthenticationFailed
        );
        assert_eq!(
            GitError::from_stderr(
                "checkout",
                "error: Your local changes to the following files would be overwritten by checkout"
            ),
            GitError::UncommittedChanges
        );
        assert_eq!(
            GitError::from_stderr(
                "rev-list",
                "fatal: Invalid revision range 767b3b3..3bcfad7\n"
            ),
            GitError::UnknownRevision("fatal: Invalid revision range 767b3b3..3bcfad7".to_string())
        );
        assert_eq!(
            GitError::from_stderr("pull", ""),
            GitError::CommandFailed("git pull failed".to_string())
        );
        assert_eq!(
            GitError::from_stderr("pull", "fatal: refusing to merge unrelated histories\n"),
            GitError::CommandFailed(
                "git pull failed: fatal: refusing to merge unrelated histories".to_string()
            )
        );
    }
}
