//! `reposync switch`

use super::context::{CommandContext, GlobalOptions};
use super::{failure_error, report_line, Outcome};
use crate::cli::args::ManifestArgs;
use crate::error::ErrorCode;
use crate::git::{GitBackend, GitError, GitResult};
use crate::manifest::checkout_path;
use crate::status::{self, driver::create_progress_bar};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Check out `branch`, creating it when missing and `create` is set
pub async fn switch_one(
    git: &dyn GitBackend,
    path: &Path,
    branch: &str,
    create: bool,
) -> GitResult<()> {
    match git.checkout(path, branch).await {
        Err(GitError::BranchNotFound(_)) if create => {
            debug!("Creating {} in {}", branch, path.display());
            git.create_branch(path, branch).await
        }
        other => other,
    }
}

/// Switch every existing checkout
pub async fn switch_all(
    context: &CommandContext,
    branch: &str,
    create: bool,
) -> Result<Vec<Outcome>> {
    status::validate(&context.repositories, &context.root, &context.git).await?;

    let targets: Vec<(String, PathBuf)> = context
        .repositories
        .iter()
        .map(|repo| (repo.dir_name(), checkout_path(&context.root, repo)))
        .filter(|(_, path)| path.exists())
        .collect();

    let progress = create_progress_bar(targets.len(), context.show_progress);
    let git = context.backend();
    let branch = Arc::new(branch.to_string());

    let mut outcomes = status::run_bounded(targets, context.parallel, &progress, move |(name, path)| {
        let git = git.clone();
        let branch = branch.clone();
        async move {
            let result = switch_one(git.as_ref(), &path, &branch, create).await;
            Some(Outcome::new(&name, result))
        }
    })
    .await;
    progress.finish_and_clear();

    outcomes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(outcomes)
}

pub async fn run_switch_command(
    options: &GlobalOptions,
    args: &ManifestArgs,
    branch: &str,
    create: bool,
) -> Result<()> {
    let context = CommandContext::load(options, args).await?;

    let outcomes = switch_all(&context, branch, create).await?;
    if outcomes.is_empty() {
        println!("No checked-out repositories to switch.");
        return Ok(());
    }

    let verb = format!("on {branch}");
    for outcome in &outcomes {
        println!("{}", report_line(outcome, &verb));
    }

    failure_error(&outcomes, "checkout", ErrorCode::GIT_BRANCH_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::test_support::{make_checkout, mock_context};

    const MISSING: &str = "error: pathspec 'release' did not match any file(s) known to git\n";

    #[tokio::test]
    async fn test_create_falls_back_to_new_branch() {
        let (_root, context, mut mock) = mock_context(&[]);
        mock.expect_command("git")
            .with_exact_args(&["checkout", "release"])
            .returns_exit_code(1)
            .returns_stderr(MISSING)
            .finish();
        mock.expect_command("git")
            .with_exact_args(&["checkout", "-b", "release"])
            .finish();

        switch_one(&context.git, &context.root, "release", true)
            .await
            .unwrap();
        assert_eq!(mock.calls_with_prefix(&["checkout", "-b"]).len(), 1);
    }

    #[tokio::test]
    async fn test_missing_branch_without_create_fails() {
        let (_root, context, mut mock) = mock_context(&[]);
        mock.expect_command("git")
            .returns_exit_code(1)
            .returns_stderr(MISSING)
            .finish();

        let result = switch_one(&context.git, &context.root, "release", false).await;

        assert_eq!(result, Err(GitError::BranchNotFound("release".to_string())));
        assert!(mock.calls_with_prefix(&["checkout", "-b"]).is_empty());
    }

    #[tokio::test]
    async fn test_dirty_tree_is_not_treated_as_missing_branch() {
        let (_root, context, mut mock) = mock_context(&[]);
        mock.expect_command("git")
            .returns_exit_code(1)
            .returns_stderr(
                "error: Your local changes to the following files would be overwritten by checkout\n",
            )
            .finish();

        let result = switch_one(&context.git, &context.root, "release", true).await;
        assert_eq!(result, Err(GitError::UncommittedChanges));
    }

    #[tokio::test]
    async fn test_switch_all_only_touches_existing_checkouts() {
        let (_root, context, mut mock) = mock_context(&["one", "two", "absent"]);
        for name in ["one", "two"] {
            let path = make_checkout(&context, name);
            mock.expect_command("git")
                .with_exact_args(&["config", "--get", "remote.origin.url"])
                .in_dir(&path)
                .returns_stdout(&format!("https://example.com/{name}.git\n"))
                .finish();
        }
        mock.expect_command("git")
            .with_exact_args(&["checkout", "develop"])
            .finish();

        let outcomes = switch_all(&context, "develop", false).await.unwrap();

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two"]);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
    }
}
