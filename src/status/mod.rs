//! Repository status reconciliation
//!
//! - `collector` - per-repository status from read-only git queries
//! - `driver` - bounded parallel fan-out over every repository
//! - `integrity` - checks that existing checkouts match the manifest
//! - `refine` - ahead/behind refinement used by `sync` and `push`
//! - `table` - text rendering of collected rows

pub mod collector;
pub mod driver;
pub mod integrity;
pub mod refine;
pub mod table;

pub use collector::collect;
pub use driver::{collect_all, run_bounded};
pub use integrity::validate;
pub use refine::{refine, refine_all};
pub use table::{render, summarize};

use std::fmt;
use std::path::PathBuf;

/// Synchronization state of a checkout relative to its remote branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// Local and remote point at the same commit (or nothing is known to differ)
    Clean,
    /// Local has commits the remote branch lacks, or the branch is not on the remote
    Unpushed,
    /// Remote has commits the local branch lacks; nothing to push
    Pullable,
    /// Both sides have commits the other lacks
    Conflict,
}

impl SyncState {
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Clean => "clean",
            SyncState::Unpushed => "unpushed",
            SyncState::Pullable => "pullable",
            SyncState::Conflict => "conflict",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of one checkout, produced fresh on every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    /// Display name (the checkout directory name)
    pub name: String,
    /// Configured `branch/revision` from the manifest
    pub config_ref: String,
    /// Local `branch/shortHash`
    pub local_ref: String,
    /// Remote short hash, empty when unknown or absent
    pub remote_ref: String,
    pub state: SyncState,
    pub path: PathBuf,
    /// Local branch name; `None` when detached or unknown
    pub branch: Option<String>,
    pub detached: bool,
    /// Full local HEAD hash, empty when unknown
    pub local_hash: String,
    /// Full remote branch hash, empty when unknown or absent
    pub remote_hash: String,
}

impl StatusRow {
    pub fn has_unpushed(&self) -> bool {
        self.state == SyncState::Unpushed
    }

    pub fn is_pullable(&self) -> bool {
        self.state == SyncState::Pullable
    }

    pub fn has_conflict(&self) -> bool {
        self.state == SyncState::Conflict
    }

    /// Both hashes known and different
    pub fn hashes_differ(&self) -> bool {
        !self.local_hash.is_empty()
            && !self.remote_hash.is_empty()
            && self.local_hash != self.remote_hash
    }
}
