//! CLI argument structures
//!
//! This module defines the top-level CLI and every subcommand.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Keep a fleet of git repositories in step with a JSON manifest
#[derive(Parser, Debug)]
#[command(name = "reposync")]
#[command(about = "reposync - clone, inspect and synchronize many git repositories at once", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Run as if started in this directory
    #[arg(short = 'C', value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Git executable to use
    #[arg(long, value_name = "PATH", global = true)]
    pub git: Option<String>,

    /// Disable colored output (also honored via NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that reads the manifest
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ManifestArgs {
    /// Manifest file (default: repos.json, or the configured default)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum repositories processed concurrently (1-32)
    #[arg(short = 'p', long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Only repositories carrying this label (repeatable)
    #[arg(short = 'l', long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone every repository that is not checked out yet
    Init {
        #[command(flatten)]
        manifest: ManifestArgs,

        /// Create shallow clones with this many commits
        #[arg(long, value_name = "N")]
        depth: Option<u32>,
    },

    /// Show the synchronization state of every checkout
    Status {
        #[command(flatten)]
        manifest: ManifestArgs,
    },

    /// Pull repositories that are behind their remote branch
    Sync {
        #[command(flatten)]
        manifest: ManifestArgs,

        /// Rebase local commits instead of merging
        #[arg(long)]
        rebase: bool,

        /// Automatically answer yes to all prompts
        #[arg(short = 'y', long = "yes")]
        auto_accept: bool,
    },

    /// Push repositories that have unpushed commits
    Push {
        #[command(flatten)]
        manifest: ManifestArgs,

        /// Automatically answer yes to all prompts
        #[arg(short = 'y', long = "yes")]
        auto_accept: bool,
    },

    /// Check out the same branch in every checkout
    Switch {
        /// Branch to check out
        branch: String,

        /// Create the branch where it does not exist
        #[arg(short = 'c', long)]
        create: bool,

        #[command(flatten)]
        manifest: ManifestArgs,
    },

    /// Print a manifest pinned to the current commits
    ///
    /// With `--label`, only matching entries are pinned; the rest are
    /// written unchanged.
    Freeze {
        #[command(flatten)]
        manifest: ManifestArgs,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
