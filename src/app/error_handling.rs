//! Fatal error reporting
//!
//! A `RepoSyncError` anywhere in the chain is shown with its code and user
//! message; anything else falls back to the plain error text. With `-v` the
//! full cause chain follows.

use crate::error::{describe_error_code, exit_code_for, RepoSyncError};
use tracing::error;

/// Text printed to stderr for a command that failed
pub fn fatal_error_message(error: &anyhow::Error, verbose: u8) -> String {
    let found = error
        .chain()
        .enumerate()
        .find_map(|(i, cause)| cause.downcast_ref::<RepoSyncError>().map(|e| (i, e)));

    let mut text = match found {
        Some((i, err)) => {
            let mut line = format!("Error [E{:04}]: {}", err.code(), err.user_message());
            // Underlying io/git causes, which the user message omits
            for cause in error.chain().skip(i + 1) {
                line.push_str(&format!(": {cause}"));
            }
            line
        }
        None => format!("Error: {error:#}"),
    };

    if verbose >= 1 {
        if let Some((_, err)) = found {
            text.push_str(&format!(
                "\n\nE{:04}: {}",
                err.code(),
                describe_error_code(err.code())
            ));
        }
        text.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            text.push_str(&format!("\n  {i}: {cause}"));
        }
    }

    text
}

/// Print `error` and exit with the status for its category
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);
    eprintln!("{}", fatal_error_message(&error, verbose));
    std::process::exit(exit_code_for(&error))
}
