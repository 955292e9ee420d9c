//! `reposync freeze`

use super::context::{CommandContext, GlobalOptions};
use super::status::collect_rows;
use crate::cli::args::ManifestArgs;
use crate::error::ErrorExt;
use crate::manifest::Manifest;
use crate::status::StatusRow;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Pin each selected entry to its checkout's current commit.
///
/// Entries keep manifest order. Entries outside `labels`, without a
/// checkout, or with an unknown HEAD are carried over unchanged; a detached
/// checkout keeps its configured branch.
pub fn freeze_manifest(manifest: &Manifest, labels: &[String], rows: &[StatusRow]) -> Manifest {
    let by_name: HashMap<&str, &StatusRow> = rows.iter().map(|row| (row.name.as_str(), row)).collect();

    let pinned = manifest
        .repositories()
        .iter()
        .map(|repo| {
            let mut entry = repo.clone();
            if !labels.is_empty() && !repo.has_any_label(labels) {
                debug!("{}: not selected, copied unchanged", repo.dir_name());
                return entry;
            }
            match by_name.get(repo.dir_name().as_str()) {
                Some(row) if !row.local_hash.is_empty() => {
                    entry.revision = Some(row.local_hash.clone());
                    if let Some(branch) = &row.branch {
                        entry.branch = Some(branch.clone());
                    }
                }
                Some(row) => warn!("{}: HEAD unknown, leaving entry unpinned", row.name),
                None => warn!("{}: not checked out, leaving entry unpinned", repo.dir_name()),
            }
            entry
        })
        .collect();

    Manifest::new(pinned)
}

pub async fn run_freeze_command(
    options: &GlobalOptions,
    args: &ManifestArgs,
    output: Option<&Path>,
) -> Result<()> {
    let context = CommandContext::load(options, args).await?;
    let rows = collect_rows(&context).await?;

    let frozen = freeze_manifest(&context.manifest, &args.labels, &rows);
    let json = frozen.to_json_pretty()?;

    match output {
        Some(path) => {
            tokio::fs::write(path, format!("{json}\n"))
                .await
                .to_reposync(format!("Cannot write {}", path.display()))?;
            info!(
                "Froze {} ({} entries) into {}",
                context.manifest_path.display(),
                frozen.repositories().len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
