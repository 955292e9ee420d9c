//! Command routing and execution
//!
//! This module routes parsed CLI commands to their implementations.

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use anyhow::Result;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(cli: Cli) -> Result<()> {
    let options = GlobalOptions::from(&cli);

    match cli.command {
        Commands::Init { manifest, depth } => run_init_command(&options, &manifest, depth).await,
        Commands::Status { manifest } => run_status_command(&options, &manifest).await,
        Commands::Sync {
            manifest,
            rebase,
            auto_accept,
        } => run_sync_command(&options, &manifest, rebase, auto_accept).await,
        Commands::Push {
            manifest,
            auto_accept,
        } => run_push_command(&options, &manifest, auto_accept).await,
        Commands::Switch {
            branch,
            create,
            manifest,
        } => run_switch_command(&options, &manifest, &branch, create).await,
        Commands::Freeze { manifest, output } => {
            run_freeze_command(&options, &manifest, output.as_deref()).await
        }
    }
}
