//! `reposync sync`

use super::context::{CommandContext, GlobalOptions};
use super::status::collect_rows;
use super::{failure_error, report_line, Outcome};
use crate::cli::args::ManifestArgs;
use crate::cli::prompt::confirm;
use crate::error::ErrorCode;
use crate::git::GitWriter;
use crate::status::{self, StatusRow};
use anyhow::Result;
use colored::*;
use tracing::info;

/// Collected rows after ahead/behind refinement
pub async fn plan_sync(context: &CommandContext) -> Result<Vec<StatusRow>> {
    let rows = collect_rows(context).await?;
    Ok(status::refine_all(rows, context.parallel, context.backend()).await)
}

/// Pull each pullable row in turn
pub async fn pull_all(git: &dyn GitWriter, rows: &[&StatusRow], rebase: bool) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(rows.len());
    for row in rows {
        info!("Pulling {}", row.name);
        let result = git.pull(&row.path, rebase).await;
        outcomes.push(Outcome::new(&row.name, result));
    }
    outcomes
}

pub async fn run_sync_command(
    options: &GlobalOptions,
    args: &ManifestArgs,
    rebase: bool,
    auto_accept: bool,
) -> Result<()> {
    let context = CommandContext::load(options, args).await?;
    let rows = plan_sync(&context).await?;
    print!("{}", status::render(&rows));

    for row in rows.iter().filter(|row| row.has_conflict()) {
        println!(
            "{} {} has diverged from origin; resolve it manually",
            "!".magenta().bold(),
            row.name
        );
    }

    let pullable: Vec<&StatusRow> = rows.iter().filter(|row| row.is_pullable()).collect();
    if pullable.is_empty() {
        println!("Nothing to pull.");
        return Ok(());
    }

    println!("\nRepositories behind origin:");
    for row in &pullable {
        println!("  {} ({})", row.name, row.branch.as_deref().unwrap_or_default());
    }

    let verb = if rebase { "Pull with rebase" } else { "Pull" };
    if !confirm(&format!("\n{verb} {} repositories?", pullable.len()), auto_accept)? {
        println!("Sync cancelled.");
        return Ok(());
    }

    let outcomes = pull_all(&context.git, &pullable, rebase).await;
    for outcome in &outcomes {
        println!("{}", report_line(outcome, "pulled"));
    }

    failure_error(&outcomes, "pull", ErrorCode::GIT_COMMAND_FAILED)
}
