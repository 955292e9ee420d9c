//! Checkout integrity validation

use crate::error::{common, ErrorCode, RepoSyncError, Result};
use crate::git::GitReader;
use crate::manifest::{checkout_path, Repository};
use std::path::Path;
use tracing::debug;

/// Verify every existing checkout belongs to its manifest entry.
///
/// Checkouts that do not exist yet are ignored. The first problem found
/// aborts validation.
pub async fn validate(repos: &[Repository], root: &Path, git: &dyn GitReader) -> Result<()> {
    for repo in repos {
        let path = checkout_path(root, repo);
        if !path.exists() {
            continue;
        }

        if !path.is_dir() {
            return Err(RepoSyncError::validation_with_code(
                ErrorCode::VALIDATION_NOT_A_DIRECTORY,
                format!("{} exists but is not a directory", path.display()),
                Some(path.display().to_string()),
            ));
        }

        // A `.git` file (worktree or submodule gitlink) does not count
        if !path.join(".git").is_dir() {
            return Err(RepoSyncError::validation_with_code(
                ErrorCode::VALIDATION_NOT_A_REPOSITORY,
                format!("{} is not a git repository", path.display()),
                Some(path.display().to_string()),
            ));
        }

        let actual = git
            .remote_url(&path)
            .await
            .map_err(|e| RepoSyncError::from(e).with_context(path.display()))?
            .unwrap_or_default();

        if actual != repo.url {
            return Err(common::remote_mismatch(&path, &repo.url, &actual));
        }

        debug!("{} matches {}", path.display(), repo.url);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitCommandRunner;
    use crate::subprocess::{MockProcessRunner, ProcessRunner};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn repo(url: &str) -> Repository {
        Repository {
            url: url.to_string(),
            ..Repository::default()
        }
    }

    fn git_with(mock: &MockProcessRunner) -> GitCommandRunner {
        GitCommandRunner::new(Arc::new(mock.clone()) as Arc<dyn ProcessRunner>)
    }

    fn make_checkout(root: &Path, name: &str) {
        std::fs::create_dir_all(root.join(name).join(".git")).unwrap();
    }

    #[tokio::test]
    async fn test_matching_and_absent_checkouts_pass() {
        let root = TempDir::new().unwrap();
        make_checkout(root.path(), "api");
        let mut mock = MockProcessRunner::new();

        mock.expect_command("git")
            .with_exact_args(&["config", "--get", "remote.origin.url"])
            .in_dir(&root.path().join("api"))
            .returns_stdout("https://example.com/api.git\n")
            .finish();

        let repos = vec![
            repo("https://example.com/api.git"),
            repo("https://example.com/not-cloned.git"),
        ];

        validate(&repos, root.path(), &git_with(&mock)).await.unwrap();
        assert_eq!(mock.get_call_history().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_mismatch_names_both_urls() {
        let root = TempDir::new().unwrap();
        make_checkout(root.path(), "api");
        let mut mock = MockProcessRunner::new();

        mock.expect_command("git")
            .returns_stdout("https://mirror.example.com/api.git\n")
            .finish();

        let err = validate(&[repo("https://example.com/api.git")], root.path(), &git_with(&mock))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert_eq!(err.code(), ErrorCode::VALIDATION_REMOTE_MISMATCH);
        assert!(message.contains("api"));
        assert!(message.contains("https://mirror.example.com/api.git"));
        assert!(message.contains("https://example.com/api.git"));
    }

    #[tokio::test]
    async fn test_unset_origin_is_mismatch() {
        let root = TempDir::new().unwrap();
        make_checkout(root.path(), "api");
        let mut mock = MockProcessRunner::new();

        mock.expect_command("git").returns_exit_code(1).finish();

        let err = validate(&[repo("https://example.com/api.git")], root.path(), &git_with(&mock))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_REMOTE_MISMATCH);
    }

    #[tokio::test]
    async fn test_plain_file_rejected() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("api"), "not a dir").unwrap();
        let mock = MockProcessRunner::new();

        let err = validate(&[repo("https://example.com/api.git")], root.path(), &git_with(&mock))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_NOT_A_DIRECTORY);
        assert_eq!(err.exit_code(), 8);
    }

    #[tokio::test]
    async fn test_directory_without_git_rejected() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("api")).unwrap();
        let mock = MockProcessRunner::new();

        let err = validate(&[repo("https://example.com/api.git")], root.path(), &git_with(&mock))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_NOT_A_REPOSITORY);
        assert!(mock.get_call_history().is_empty());
    }

    #[tokio::test]
    async fn test_git_file_instead_of_directory_rejected() {
        let root = TempDir::new().unwrap();
        let checkout = root.path().join("api");
        std::fs::create_dir(&checkout).unwrap();
        std::fs::write(checkout.join(".git"), "gitdir: ../.git/worktrees/api\n").unwrap();
        let mock = MockProcessRunner::new();

        let err = validate(&[repo("https://example.com/api.git")], root.path(), &git_with(&mock))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_NOT_A_REPOSITORY);
        assert!(mock.get_call_history().is_empty());
    }

    #[tokio::test]
    async fn test_first_failure_stops_validation() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("a")).unwrap();
        make_checkout(root.path(), "b");
        let mock = MockProcessRunner::new();

        let repos = vec![repo("https://example.com/a.git"), repo("https://example.com/b.git")];
        let err = validate(&repos, root.path(), &git_with(&mock)).await.unwrap_err();

        assert!(err.to_string().contains("a"));
        assert!(mock.get_call_history().is_empty());
    }
}
