//! `reposync status`

use super::context::{CommandContext, GlobalOptions};
use crate::cli::args::ManifestArgs;
use crate::status::{self, StatusRow};
use anyhow::Result;

/// Validate checkouts and collect a row for each one
pub async fn collect_rows(context: &CommandContext) -> Result<Vec<StatusRow>> {
    status::validate(&context.repositories, &context.root, &context.git).await?;

    Ok(status::collect_all(
        &context.repositories,
        context.root.clone(),
        context.parallel,
        context.reader(),
        context.show_progress,
    )
    .await)
}

/// Rendered table plus a one-line summary
pub async fn status_report(context: &CommandContext) -> Result<String> {
    let rows = collect_rows(context).await?;
    let mut report = status::render(&rows);
    if !rows.is_empty() {
        report.push_str(&status::summarize(&rows));
        report.push('\n');
    }
    Ok(report)
}

pub async fn run_status_command(options: &GlobalOptions, args: &ManifestArgs) -> Result<()> {
    let context = CommandContext::load(options, args).await?;
    print!("{}", status_report(&context).await?);
    Ok(())
}
