//! # reposync
//!
//! Manage a fleet of git repositories declared in one JSON manifest.
//!
//! ## Usage
//!
//! ```bash
//! reposync init [--depth N]        # clone what is missing
//! reposync status [-p N] [-l web]  # table of sync states
//! reposync sync [--rebase] [--yes] # pull repositories that are behind
//! reposync push [--yes]            # push repositories that are ahead
//! reposync switch <branch> [-c]    # same branch everywhere
//! reposync freeze [-o pinned.json] # manifest pinned to current commits
//! ```
//!
//! ## Modules
//!
//! - `app` - Fatal error reporting for the binary
//! - `cli` - Argument parsing, command handlers and prompts
//! - `config` - Layered settings (defaults, settings file, environment)
//! - `error` - Unified error type with numeric codes
//! - `git` - Narrow, mockable git backend over the `git` executable
//! - `manifest` - Manifest parsing and checkout directory resolution
//! - `status` - Status collection, classification and rendering
//! - `subprocess` - Subprocess abstraction layer for testing
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod manifest;
pub mod status;
pub mod subprocess;
