//! Shared setup for every manifest-driven command

use crate::cli::args::{Cli, ManifestArgs};
use crate::cli::validation::{resolve_manifest_path, resolve_parallelism, resolve_root};
use crate::config::Settings;
use crate::error::{common, Result};
use crate::git::{GitBackend, GitCommandRunner, GitReader};
use crate::manifest::{Manifest, Repository};
use crate::subprocess::SubprocessManager;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Flags that apply to every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub root: Option<PathBuf>,
    pub git: Option<String>,
    pub verbose: u8,
}

impl From<&Cli> for GlobalOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            root: cli.root.clone(),
            git: cli.git.clone(),
            verbose: cli.verbose,
        }
    }
}

/// Everything a command handler needs, resolved once up front
pub struct CommandContext {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
    /// Manifest entries after label filtering, in manifest order
    pub repositories: Vec<Repository>,
    pub parallel: usize,
    pub clone_depth: Option<u32>,
    pub git: GitCommandRunner,
    pub show_progress: bool,
}

impl CommandContext {
    /// Resolve settings, load the manifest and check that git runs
    pub async fn load(options: &GlobalOptions, args: &ManifestArgs) -> Result<Self> {
        let settings = Settings::load().await?;
        Self::load_with(options, args, settings, SubprocessManager::production()).await
    }

    pub async fn load_with(
        options: &GlobalOptions,
        args: &ManifestArgs,
        settings: Settings,
        subprocess: SubprocessManager,
    ) -> Result<Self> {
        let root = resolve_root(options.root.as_deref())?;
        let manifest_file = args.file.clone().unwrap_or(settings.manifest);
        let manifest_path = resolve_manifest_path(&root, &manifest_file);
        let manifest = Manifest::load(&manifest_path).await?;

        let repositories = manifest.select(&args.labels);
        if !args.labels.is_empty() {
            info!(
                "{} of {} repositories match labels {:?}",
                repositories.len(),
                manifest.repositories().len(),
                args.labels
            );
        }

        let program = options.git.clone().unwrap_or(settings.git);
        let git = subprocess.git(&program);
        let version = git
            .version()
            .await
            .map_err(|e| common::git_unavailable(&program).with_source(e))?;
        debug!("Using {}", version);

        Ok(Self {
            root,
            manifest_path,
            manifest,
            repositories,
            parallel: resolve_parallelism(args.parallel, settings.parallel),
            clone_depth: settings.clone_depth,
            git,
            show_progress: std::io::stderr().is_terminal(),
        })
    }

    pub fn reader(&self) -> Arc<dyn GitReader> {
        Arc::new(self.git.clone())
    }

    pub fn backend(&self) -> Arc<dyn GitBackend> {
        Arc::new(self.git.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    fn write_manifest(dir: &std::path::Path) {
        std::fs::write(
            dir.join("repos.json"),
            r#"{ "repositories": [
                { "url": "https://example.com/a.git", "labels": ["web"] },
                { "url": "https://example.com/b.git" }
            ] }"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_load_with_labels_and_parallel() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path());
        let (subprocess, mut mock) = SubprocessManager::mock();
        mock.expect_command("git")
            .with_exact_args(&["--version"])
            .returns_stdout("git version 2.43.0\n")
            .finish();

        let options = GlobalOptions {
            root: Some(temp_dir.path().to_path_buf()),
            ..GlobalOptions::default()
        };
        let args = ManifestArgs {
            parallel: Some(64),
            labels: vec!["web".to_string()],
            ..ManifestArgs::default()
        };

        let context = CommandContext::load_with(&options, &args, Settings::default(), subprocess)
            .await
            .unwrap();

        assert_eq!(context.repositories.len(), 1);
        assert_eq!(context.manifest.repositories().len(), 2);
        assert_eq!(context.parallel, 32);
        assert_eq!(context.manifest_path, temp_dir.path().join("repos.json"));
    }

    #[tokio::test]
    async fn test_missing_git_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path());
        let (subprocess, mock) = SubprocessManager::mock();

        let options = GlobalOptions {
            root: Some(temp_dir.path().to_path_buf()),
            git: Some("/opt/no/git".to_string()),
            ..GlobalOptions::default()
        };

        let err = CommandContext::load_with(&options, &ManifestArgs::default(), Settings::default(), subprocess)
            .await
            .err()
            .unwrap();

        assert_eq!(err.code(), ErrorCode::GIT_UNAVAILABLE);
        assert!(err.to_string().contains("/opt/no/git"));
        assert_eq!(mock.get_call_history()[0].program, "/opt/no/git");
    }

    #[tokio::test]
    async fn test_missing_manifest_precedes_git_preflight() {
        let temp_dir = TempDir::new().unwrap();
        let (subprocess, mock) = SubprocessManager::mock();

        let options = GlobalOptions {
            root: Some(temp_dir.path().to_path_buf()),
            ..GlobalOptions::default()
        };

        let err = CommandContext::load_with(&options, &ManifestArgs::default(), Settings::default(), subprocess)
            .await
            .err()
            .unwrap();

        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
        assert!(mock.get_call_history().is_empty());
    }
}
