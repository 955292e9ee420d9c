//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command implementations
//! - Confirmation prompts
//! - Input validation

pub mod args;
pub mod commands;
pub mod help;
pub mod prompt;
pub mod router;
pub mod validation;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands, ManifestArgs};
pub use help::get_log_level;
pub use router::execute_command;
pub use validation::{resolve_parallelism, resolve_root};
