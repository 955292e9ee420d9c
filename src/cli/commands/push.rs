//! `reposync push`

use super::context::{CommandContext, GlobalOptions};
use super::sync::plan_sync;
use super::{failure_error, report_line, Outcome};
use crate::cli::args::ManifestArgs;
use crate::cli::prompt::confirm;
use crate::error::ErrorCode;
use crate::git::GitWriter;
use crate::status::{self, StatusRow};
use anyhow::Result;
use tracing::info;

/// Rows that can be pushed as-is: unpushed, on a branch, not diverged
pub fn push_candidates(rows: &[StatusRow]) -> Vec<&StatusRow> {
    rows.iter()
        .filter(|row| row.has_unpushed() && !row.detached && row.branch.is_some())
        .collect()
}

pub async fn push_all(git: &dyn GitWriter, rows: &[&StatusRow]) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(branch) = row.branch.as_deref() else {
            continue;
        };
        info!("Pushing {} ({})", row.name, branch);
        let result = git.push(&row.path, branch).await;
        outcomes.push(Outcome::new(&row.name, result));
    }
    outcomes
}

pub async fn run_push_command(
    options: &GlobalOptions,
    args: &ManifestArgs,
    auto_accept: bool,
) -> Result<()> {
    let context = CommandContext::load(options, args).await?;
    let rows = plan_sync(&context).await?;
    print!("{}", status::render(&rows));

    let candidates = push_candidates(&rows);
    if candidates.is_empty() {
        println!("Nothing to push.");
        return Ok(());
    }

    println!("\nRepositories with unpushed commits:");
    for row in &candidates {
        println!("  {} ({})", row.name, row.branch.as_deref().unwrap_or_default());
    }

    if !confirm(&format!("\nPush {} repositories?", candidates.len()), auto_accept)? {
        println!("Push cancelled.");
        return Ok(());
    }

    let outcomes = push_all(&context.git, &candidates).await;
    for outcome in &outcomes {
        println!("{}", report_line(outcome, "pushed"));
    }

    failure_error(&outcomes, "push", ErrorCode::GIT_PUSH_REJECTED)
}
