//! Common test utilities: real git repositories in temp directories
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Whether a usable `git` is on PATH
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run git in `dir`, panicking with its stderr on failure; returns stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .output()
        .expect("failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Add a file and commit it
pub fn commit(dir: &Path, file: &str, message: &str) -> String {
    std::fs::write(dir.join(file), message).unwrap();
    git(dir, &["add", file]);
    git(dir, &["commit", "-q", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

/// Test workspace: bare "remotes" plus a root holding checkouts
pub struct Workspace {
    pub temp: TempDir,
    pub root: PathBuf,
    pub remotes: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        let remotes = temp.path().join("remotes");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&remotes).unwrap();
        Self {
            temp,
            root,
            remotes,
        }
    }

    /// Bare repository `<name>.git` with one commit on `main`; returns its URL
    pub fn create_remote(&self, name: &str) -> String {
        let seed = self.temp.path().join(format!("seed-{name}"));
        std::fs::create_dir_all(&seed).unwrap();
        git(&seed, &["init", "-q"]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        commit(&seed, "README", &format!("{name} initial"));

        let bare = self.remotes.join(format!("{name}.git"));
        git(
            self.temp.path(),
            &["clone", "-q", "--bare", seed.to_str().unwrap(), bare.to_str().unwrap()],
        );
        bare.to_str().unwrap().to_string()
    }

    /// Clone `url` into `root/<name>`
    pub fn checkout(&self, url: &str, name: &str) -> PathBuf {
        git(&self.root, &["clone", "-q", url, name]);
        self.root.join(name)
    }

    /// Write `root/repos.json` listing the given URLs
    pub fn write_manifest(&self, urls: &[&str]) {
        let entries: Vec<serde_json::Value> = urls
            .iter()
            .map(|url| serde_json::json!({ "url": url, "branch": "main" }))
            .collect();
        let manifest = serde_json::json!({ "repositories": entries });
        std::fs::write(
            self.root.join("repos.json"),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();
    }

    /// `reposync` rooted here, isolated from user settings
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("reposync").unwrap();
        cmd.arg("-C")
            .arg(&self.root)
            .env("REPOSYNC_CONFIG", self.temp.path().join("no-settings.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("REPOSYNC_MANIFEST")
            .env_remove("REPOSYNC_PARALLEL")
            .env_remove("REPOSYNC_GIT")
            .env_remove("REPOSYNC_CLONE_DEPTH");
        cmd
    }
}
