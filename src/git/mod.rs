//! Git backend
//!
//! The narrow interface every command goes through to talk to git. Reads and
//! writes are separate traits; [`GitCommandRunner`] implements both by
//! shelling out to the `git` executable through a [`ProcessRunner`], so tests
//! substitute the mock runner instead of real repositories.

pub mod error;
pub mod parsers;
pub mod types;

pub use error::GitError;
pub use parsers::*;
pub use types::*;

use crate::subprocess::{ProcessCommandBuilder, ProcessError, ProcessOutput, ProcessRunner};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Result type for git backend calls
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Read-only git queries used by status collection and validation
#[async_trait]
pub trait GitReader: Send + Sync {
    /// `git --version`; fails when the executable cannot be run
    async fn version(&self) -> GitResult<String>;

    /// What HEAD points at (`rev-parse --abbrev-ref HEAD`)
    async fn current_branch(&self, path: &Path) -> GitResult<HeadRef>;

    /// Abbreviated HEAD hash (`rev-parse --short HEAD`)
    async fn short_hash(&self, path: &Path) -> GitResult<String>;

    /// Full HEAD hash (`rev-parse HEAD`)
    async fn head_hash(&self, path: &Path) -> GitResult<CommitId>;

    /// Hash of `refs/heads/<branch>` on origin, `None` if the branch does not exist there
    async fn remote_hash(&self, path: &Path, branch: &str) -> GitResult<Option<CommitId>>;

    /// Number of commits reachable from `to` but not from `from`
    async fn count_commits(&self, path: &Path, from: &str, to: &str) -> GitResult<u64>;

    /// Configured `remote.origin.url`, `None` when unset
    async fn remote_url(&self, path: &Path) -> GitResult<Option<String>>;
}

/// Mutating git operations used by init/sync/push/switch
#[async_trait]
pub trait GitWriter: Send + Sync {
    /// Clone `url` into `root/dir`
    async fn clone_repository(
        &self,
        root: &Path,
        url: &str,
        dir: &str,
        depth: Option<u32>,
    ) -> GitResult<()>;

    /// Check out an existing branch or revision
    async fn checkout(&self, path: &Path, reference: &str) -> GitResult<()>;

    /// Create a branch at HEAD and check it out (`checkout -b`)
    async fn create_branch(&self, path: &Path, name: &str) -> GitResult<()>;

    /// Fetch a single branch from origin
    async fn fetch(&self, path: &Path, branch: &str) -> GitResult<()>;

    /// Pull the tracking branch, optionally rebasing
    async fn pull(&self, path: &Path, rebase: bool) -> GitResult<()>;

    /// Push a branch to origin
    async fn push(&self, path: &Path, branch: &str) -> GitResult<()>;
}

/// Combined trait for all git operations
pub trait GitBackend: GitReader + GitWriter {}

impl<T: GitReader + GitWriter> GitBackend for T {}

/// Production implementation of git operations
#[derive(Clone)]
pub struct GitCommandRunner {
    process_runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl GitCommandRunner {
    /// Create a runner for the `git` found on PATH
    pub fn new(process_runner: Arc<dyn ProcessRunner>) -> Self {
        Self::with_program(process_runner, "git")
    }

    /// Create a runner for a specific git executable
    pub fn with_program(process_runner: Arc<dyn ProcessRunner>, program: &str) -> Self {
        Self {
            process_runner,
            program: program.to_string(),
        }
    }

    /// Execute a git command
    async fn run_git_command(&self, path: Option<&Path>, args: &[&str]) -> GitResult<ProcessOutput> {
        let command = ProcessCommandBuilder::new(&self.program)
            .args(args)
            .untranslated()
            .in_checkout(path)
            .build();

        self.process_runner
            .run(command)
            .await
            .map_err(|e| match e {
                ProcessError::CommandNotFound(program) => GitError::Unavailable(program),
                other => GitError::CommandFailed(format!("Git command failed: {other}")),
            })
    }

    /// Run a command and return trimmed stdout, failing on non-zero exit
    async fn read_line(&self, path: &Path, args: &[&str]) -> GitResult<String> {
        let output = self.run_git_command(Some(path), args).await?;
        if !output.status.success() {
            return Err(GitError::from_stderr(args[0], &output.stderr));
        }
        parse_single_line(&output.stdout)
            .ok_or_else(|| GitError::UnexpectedOutput(format!("git {} printed nothing", args.join(" "))))
    }

    /// Run a write command, failing with a classified error on non-zero exit
    async fn run_checked(&self, path: &Path, args: &[&str]) -> GitResult<ProcessOutput> {
        let output = self.run_git_command(Some(path), args).await?;
        if !output.status.success() {
            return Err(GitError::from_stderr(args[0], &output.stderr));
        }
        Ok(output)
    }
}

#[async_trait]
impl GitReader for GitCommandRunner {
    async fn version(&self) -> GitResult<String> {
        let output = self.run_git_command(None, &["--version"]).await?;
        if !output.status.success() {
            return Err(GitError::Unavailable(self.program.clone()));
        }
        Ok(output.stdout.trim().to_string())
    }

    async fn current_branch(&self, path: &Path) -> GitResult<HeadRef> {
        let output = self
            .run_git_command(Some(path), &["rev-parse", "--abbrev-ref", "HEAD"])
            .await?;

        if !output.status.success() {
            return Err(GitError::from_stderr("rev-parse", &output.stderr));
        }

        parse_head_ref(&output.stdout)
            .ok_or_else(|| GitError::UnexpectedOutput("empty branch name".to_string()))
    }

    async fn short_hash(&self, path: &Path) -> GitResult<String> {
        self.read_line(path, &["rev-parse", "--short", "HEAD"]).await
    }

    async fn head_hash(&self, path: &Path) -> GitResult<CommitId> {
        self.read_line(path, &["rev-parse", "HEAD"])
            .await
            .map(CommitId::from)
    }

    async fn remote_hash(&self, path: &Path, branch: &str) -> GitResult<Option<CommitId>> {
        let refspec = format!("refs/heads/{branch}");
        let output = self
            .run_git_command(Some(path), &["ls-remote", "origin", &refspec])
            .await?;

        if !output.status.success() {
            return Err(GitError::from_stderr("ls-remote", &output.stderr));
        }

        Ok(parse_ls_remote(&output.stdout).map(CommitId::from))
    }

    async fn count_commits(&self, path: &Path, from: &str, to: &str) -> GitResult<u64> {
        let range = format!("{from}..{to}");
        let output = self
            .run_git_command(Some(path), &["rev-list", "--count", &range])
            .await?;

        if !output.status.success() {
            return Err(GitError::from_stderr("rev-list", &output.stderr));
        }

        parse_count(&output.stdout)
    }

    async fn remote_url(&self, path: &Path) -> GitResult<Option<String>> {
        let output = self
            .run_git_command(Some(path), &["config", "--get", "remote.origin.url"])
            .await?;

        // `config --get` exits 1 when the key is unset
        match output.status.code() {
            Some(0) => Ok(parse_single_line(&output.stdout)),
            Some(1) => Ok(None),
            _ => Err(GitError::from_stderr("config", &output.stderr)),
        }
    }
}

#[async_trait]
impl GitWriter for GitCommandRunner {
    async fn clone_repository(
        &self,
        root: &Path,
        url: &str,
        dir: &str,
        depth: Option<u32>,
    ) -> GitResult<()> {
        let depth = depth.map(|d| d.to_string());
        let mut args = vec!["clone"];
        if let Some(ref depth) = depth {
            args.extend(["--depth", depth.as_str()]);
        }
        args.extend([url, dir]);

        self.run_checked(root, &args).await.map(|_| ())
    }

    async fn checkout(&self, path: &Path, reference: &str) -> GitResult<()> {
        let output = self.run_git_command(Some(path), &["checkout", reference]).await?;

        if !output.status.success() {
            if output.stderr.contains("did not match any") || output.stderr.contains("invalid reference") {
                return Err(GitError::BranchNotFound(reference.to_string()));
            }
            return Err(GitError::from_stderr("checkout", &output.stderr));
        }

        Ok(())
    }

    async fn create_branch(&self, path: &Path, name: &str) -> GitResult<()> {
        self.run_checked(path, &["checkout", "-b", name])
            .await
            .map(|_| ())
    }

    async fn fetch(&self, path: &Path, branch: &str) -> GitResult<()> {
        self.run_checked(path, &["fetch", "origin", branch])
            .await
            .map(|_| ())
    }

    async fn pull(&self, path: &Path, rebase: bool) -> GitResult<()> {
        let args: &[&str] = if rebase { &["pull", "--rebase"] } else { &["pull"] };
        self.run_checked(path, args).await.map(|_| ())
    }

    async fn push(&self, path: &Path, branch: &str) -> GitResult<()> {
        let output = self
            .run_git_command(Some(path), &["push", "origin", branch])
            .await?;

        if !output.status.success() {
            if output.stderr.contains("[rejected]") || output.stderr.contains("non-fast-forward") {
                return Err(GitError::PushRejected(branch.to_string()));
            }
            return Err(GitError::from_stderr("push", &output.stderr));
        }

        Ok(())
    }
}
