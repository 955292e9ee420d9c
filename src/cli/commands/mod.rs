//! Command implementation modules
//!
//! Each command is implemented as a separate module; `context` holds the
//! setup they share.

pub mod context;
pub mod freeze;
pub mod init;
pub mod push;
pub mod status;
pub mod switch;
pub mod sync;

pub use context::{CommandContext, GlobalOptions};
pub use freeze::run_freeze_command;
pub use init::run_init_command;
pub use push::run_push_command;
pub use status::run_status_command;
pub use switch::run_switch_command;
pub use sync::run_sync_command;

use crate::error::RepoSyncError;
use crate::git::{GitError, GitResult};
use colored::*;

/// Result of a write operation on one repository
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub name: String,
    pub result: GitResult<()>,
}

impl Outcome {
    pub fn new(name: &str, result: GitResult<()>) -> Self {
        Self {
            name: name.to_string(),
            result,
        }
    }

    pub fn error(&self) -> Option<&GitError> {
        self.result.as_ref().err()
    }
}

/// `✓ name pulled` or `✗ name: reason`
pub fn report_line(outcome: &Outcome, verb: &str) -> String {
    match &outcome.result {
        Ok(()) => format!("{} {} {}", "✓".green(), outcome.name, verb),
        Err(e) => format!("{} {}: {}", "✗".red(), outcome.name, e),
    }
}

/// Error naming every failed repository, if any failed
pub fn failure_error(outcomes: &[Outcome], operation: &str, code: u16) -> anyhow::Result<()> {
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| outcome.error().is_some())
        .map(|outcome| outcome.name.as_str())
        .collect();

    if failed.is_empty() {
        return Ok(());
    }

    Err(RepoSyncError::git(
        code,
        format!(
            "{} of {} {} operations failed: {}",
            failed.len(),
            outcomes.len(),
            operation,
            failed.join(", ")
        ),
        operation,
    )
    .into())
}
