//! Layered settings
//!
//! Precedence, lowest first: built-in defaults, the global settings file
//! (`<config dir>/reposync/config.toml`, or the path in `REPOSYNC_CONFIG`),
//! `REPOSYNC_*` environment variables, then command-line flags (applied by
//! the CLI layer).

use crate::error::{ErrorCode, ErrorExt, RepoSyncError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Smallest accepted worker count
pub const MIN_PARALLEL: usize = 1;
/// Largest accepted worker count
pub const MAX_PARALLEL: usize = 32;
/// Worker count when nothing else is configured
pub const DEFAULT_PARALLEL: usize = 4;
/// Manifest file name looked up in the working root
pub const DEFAULT_MANIFEST: &str = "repos.json";

/// Directory holding the global settings file
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "reposync").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Settings file location: `REPOSYNC_CONFIG`, else the global config dir
pub fn settings_path() -> Option<PathBuf> {
    match std::env::var_os("REPOSYNC_CONFIG") {
        Some(path) => Some(PathBuf::from(path)),
        None => global_config_dir().map(|dir| dir.join("config.toml")),
    }
}

/// Settings file contents; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub manifest: Option<PathBuf>,
    pub parallel: Option<usize>,
    pub git: Option<String>,
    pub clone_depth: Option<u32>,
}

/// Effective settings after merging every layer below the CLI
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub manifest: PathBuf,
    pub parallel: usize,
    pub git: String,
    pub clone_depth: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            parallel: DEFAULT_PARALLEL,
            git: "git".to_string(),
            clone_depth: None,
        }
    }
}

impl Settings {
    /// Defaults, then the global settings file, then the process environment
    pub async fn load() -> Result<Self> {
        let mut settings = Self::default();

        if let Some(path) = settings_path() {
            if let Some(file) = read_settings_file(&path).await? {
                settings.apply_file(file);
            }
        }

        settings.merge_env_vars()?;
        Ok(settings)
    }

    /// Overlay values present in a settings file
    pub fn apply_file(&mut self, file: SettingsFile) {
        if let Some(manifest) = file.manifest {
            self.manifest = manifest;
        }
        if let Some(parallel) = file.parallel {
            self.parallel = parallel;
        }
        if let Some(git) = file.git {
            self.git = git;
        }
        if file.clone_depth.is_some() {
            self.clone_depth = file.clone_depth;
        }
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env(|key| std::env::var(key).ok())
    }

    /// Overlay `REPOSYNC_*` values from an environment lookup
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(manifest) = lookup("REPOSYNC_MANIFEST") {
            self.manifest = PathBuf::from(manifest);
        }

        if let Some(git) = lookup("REPOSYNC_GIT") {
            self.git = git;
        }

        if let Some(parallel) = lookup("REPOSYNC_PARALLEL") {
            self.parallel = parse_env_number("REPOSYNC_PARALLEL", &parallel)?;
        }

        if let Some(depth) = lookup("REPOSYNC_CLONE_DEPTH") {
            self.clone_depth = Some(parse_env_number("REPOSYNC_CLONE_DEPTH", &depth)?);
        }

        Ok(())
    }
}

fn parse_env_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        RepoSyncError::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            format!("{key} must be a non-negative integer, got '{value}'"),
        )
    })
}

/// Read a settings file; a missing file is not an error
pub async fn read_settings_file(path: &Path) -> Result<Option<SettingsFile>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No settings file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e).to_config_error(format!("Cannot read {}", path.display())),
    };

    debug!("Loaded settings from {}", path.display());
    toml::from_str(&content).map(Some).map_err(|e| {
        RepoSyncError::config_with_code(
            ErrorCode::CONFIG_INVALID_TOML,
            format!("Invalid settings file {}: {}", path.display(), e),
        )
    })
}
