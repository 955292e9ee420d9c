//! Repository manifest
//!
//! The JSON file listing every repository a command operates on:
//!
//! ```json
//! { "repositories": [ { "url": "https://example.com/api.git",
//!                       "id": "api", "branch": "main",
//!                       "revision": "1a2b3c4", "labels": ["backend"] } ] }
//! ```
//!
//! Only `url` is required. A missing or `null` `repositories` key, or an
//! entry without a `url`, is a configuration error distinct from the file
//! not existing.

pub mod resolver;

pub use resolver::{checkout_path, dir_name_from_url, resolve_dir_name};

use crate::error::{common, ErrorCode, ErrorExt, RepoSyncError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One manifest entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Remote clone URL
    pub url: String,
    /// Explicit checkout directory name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Desired tracking branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Commit to pin to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Free-form selection tags, in manifest order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl Repository {
    /// Directory name this repository is checked out into
    pub fn dir_name(&self) -> String {
        resolve_dir_name(self)
    }

    /// Display string for the configured branch and revision
    pub fn config_ref(&self) -> String {
        let branch = self.branch.as_deref().filter(|b| !b.is_empty());
        let revision = self.revision.as_deref().filter(|r| !r.is_empty());
        match (branch, revision) {
            (Some(branch), Some(revision)) => format!("{branch}/{revision}"),
            (Some(branch), None) => branch.to_string(),
            (None, Some(revision)) => revision.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Whether the entry carries any of the given labels
    pub fn has_any_label(&self, labels: &[String]) -> bool {
        labels.iter().any(|label| self.labels.contains(label))
    }
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    repositories: Option<Vec<RawRepository>>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    revision: Option<String>,
    #[serde(default)]
    labels: Option<Vec<String>>,
}

/// Parsed and validated manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    repositories: Vec<Repository>,
}

impl Manifest {
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self { repositories }
    }

    /// Read and validate a manifest file
    pub async fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest from {}", path.display());

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(common::config_not_found(path));
            }
            Err(e) => {
                return Err(e).to_config_error(format!("Cannot read manifest {}", path.display()));
            }
        };

        Self::from_json(&content).map_err(|e| e.with_context(path.display()))
    }

    /// Parse and validate manifest JSON
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawManifest = serde_json::from_str(content).map_err(|e| {
            RepoSyncError::config_with_code(
                ErrorCode::CONFIG_INVALID_JSON,
                format!("Manifest is not valid JSON ({e})"),
            )
            .with_source(e)
        })?;

        let raw_repos = raw
            .repositories
            .ok_or_else(|| common::missing_required_field("repositories"))?;

        let mut repositories = Vec::with_capacity(raw_repos.len());
        for (index, raw_repo) in raw_repos.into_iter().enumerate() {
            let url = raw_repo
                .url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .ok_or_else(|| common::missing_required_field(&format!("repositories[{index}].url")))?;

            repositories.push(Repository {
                url,
                id: raw_repo.id,
                branch: raw_repo.branch,
                revision: raw_repo.revision,
                labels: raw_repo.labels.unwrap_or_default(),
            });
        }

        let manifest = Self { repositories };
        manifest.check_unique_directories()?;
        debug!("Manifest lists {} repositories", manifest.repositories.len());
        Ok(manifest)
    }

    fn check_unique_directories(&self) -> Result<()> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for repo in &self.repositories {
            let dir = repo.dir_name();
            if let Some(previous) = seen.insert(dir.clone(), &repo.url) {
                return Err(RepoSyncError::config_with_code(
                    ErrorCode::CONFIG_DUPLICATE_DIRECTORY,
                    format!(
                        "'{}' and '{}' both resolve to directory '{}'; set a distinct id",
                        previous, repo.url, dir
                    ),
                ));
            }
        }
        Ok(())
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Repositories carrying at least one of `labels`; all of them when `labels` is empty
    pub fn select(&self, labels: &[String]) -> Vec<Repository> {
        self.repositories
            .iter()
            .filter(|repo| labels.is_empty() || repo.has_any_label(labels))
            .cloned()
            .collect()
    }

    /// Pretty JSON in manifest format
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            RepoSyncError::other("Failed to serialize manifest").with_source(e)
        })
    }
}
