//! `reposync init`

use super::context::{CommandContext, GlobalOptions};
use super::{failure_error, report_line, Outcome};
use crate::cli::args::ManifestArgs;
use crate::error::ErrorCode;
use crate::git::{GitBackend, GitResult};
use crate::manifest::{checkout_path, Repository};
use crate::status::{self, driver::create_progress_bar};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Clone one repository, then check out its configured branch and revision
pub async fn clone_one(
    git: &dyn GitBackend,
    root: &Path,
    repo: &Repository,
    depth: Option<u32>,
) -> GitResult<()> {
    let dir = repo.dir_name();
    info!("Cloning {} into {}", repo.url, dir);
    git.clone_repository(root, &repo.url, &dir, depth).await?;

    let path = root.join(&dir);
    if let Some(branch) = repo.branch.as_deref().filter(|b| !b.is_empty()) {
        git.checkout(&path, branch).await?;
    }
    if let Some(revision) = repo.revision.as_deref().filter(|r| !r.is_empty()) {
        git.checkout(&path, revision).await?;
    }
    Ok(())
}

/// Clone every repository without a checkout; existing ones are left alone
pub async fn clone_missing(context: &CommandContext, depth: Option<u32>) -> Result<Vec<Outcome>> {
    status::validate(&context.repositories, &context.root, &context.git).await?;

    let missing: Vec<Repository> = context
        .repositories
        .iter()
        .filter(|repo| {
            let exists = checkout_path(&context.root, repo).exists();
            if exists {
                debug!("{} already checked out", repo.dir_name());
            }
            !exists
        })
        .cloned()
        .collect();

    let progress = create_progress_bar(missing.len(), context.show_progress);
    let git: Arc<dyn GitBackend> = context.backend();
    let root = Arc::new(context.root.clone());

    let mut outcomes = status::run_bounded(missing, context.parallel, &progress, move |repo| {
        let git = git.clone();
        let root = root.clone();
        async move {
            let result = clone_one(git.as_ref(), &root, &repo, depth).await;
            Some(Outcome::new(&repo.dir_name(), result))
        }
    })
    .await;
    progress.finish_and_clear();

    outcomes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(outcomes)
}

pub async fn run_init_command(
    options: &GlobalOptions,
    args: &ManifestArgs,
    depth: Option<u32>,
) -> Result<()> {
    let context = CommandContext::load(options, args).await?;
    let depth = depth.or(context.clone_depth);

    let outcomes = clone_missing(&context, depth).await?;
    if outcomes.is_empty() {
        println!("All {} repositories are already checked out.", context.repositories.len());
        return Ok(());
    }

    for outcome in &outcomes {
        println!("{}", report_line(outcome, "cloned"));
    }

    failure_error(&outcomes, "clone", ErrorCode::GIT_COMMAND_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::test_support::{make_checkout, mock_context};
    use crate::git::GitError;

    #[tokio::test]
    async fn test_clone_then_checkout_branch_and_revision() {
        let (_root, context, mut mock) = mock_context(&[]);
        mock.expect_command("git").returns_success().finish();

        let repo = Repository {
            url: "https://example.com/tools.git".to_string(),
            branch: Some("stable".to_string()),
            revision: Some("9f8e7d6".to_string()),
            ..Repository::default()
        };
        clone_one(&context.git, &context.root, &repo, Some(1)).await.unwrap();

        let calls = mock.get_call_history();
        let args: Vec<Vec<String>> = calls.iter().map(|c| c.args.clone()).collect();
        assert_eq!(
            args,
            vec![
                vec!["clone", "--depth", "1", "https://example.com/tools.git", "tools"],
                vec!["checkout", "stable"],
                vec!["checkout", "9f8e7d6"],
            ]
        );
        assert_eq!(calls[0].working_dir.as_deref(), Some(context.root.as_path()));
        assert_eq!(calls[1].working_dir, Some(context.root.join("tools")));
    }

    #[tokio::test]
    async fn test_checkout_failure_stops_that_repository() {
        let (_root, context, mut mock) = mock_context(&[]);
        mock.expect_command("git")
            .with_args(|args| args.first().map(String::as_str) == Some("clone"))
            .finish();
        mock.expect_command("git")
            .with_args(|args| args.first().map(String::as_str) == Some("checkout"))
            .returns_exit_code(1)
            .returns_stderr("error: pathspec 'gone' did not match any file(s) known to git\n")
            .finish();

        let repo = Repository {
            url: "https://example.com/tools.git".to_string(),
            branch: Some("gone".to_string()),
            revision: Some("9f8e7d6".to_string()),
            ..Repository::default()
        };
        let result = clone_one(&context.git, &context.root, &repo, None).await;

        assert_eq!(result, Err(GitError::BranchNotFound("gone".to_string())));
        assert_eq!(mock.calls_with_prefix(&["checkout"]).len(), 1);
    }

    #[tokio::test]
    async fn test_existing_checkouts_are_left_alone() {
        let (_root, context, mut mock) = mock_context(&["have", "need"]);
        let have = make_checkout(&context, "have");

        mock.expect_command("git")
            .with_exact_args(&["config", "--get", "remote.origin.url"])
            .in_dir(&have)
            .returns_stdout("https://example.com/have.git\n")
            .finish();
        mock.expect_command("git").returns_success().finish();

        let outcomes = clone_missing(&context, None).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].name, "need");
        assert!(outcomes[0].result.is_ok());

        let clones = mock.calls_with_prefix(&["clone"]);
        assert_eq!(clones.len(), 1);
        assert_eq!(clones[0].args.last().map(String::as_str), Some("need"));
    }
}
