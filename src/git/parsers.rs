//! Git output parsers
//!
//! Pure functions over captured stdout; no I/O happens here.

use super::error::GitError;
use super::types::HeadRef;

/// Length of the abbreviated hashes shown in tables
pub const SHORT_HASH_LEN: usize = 7;

/// First non-empty trimmed line of command output
pub fn parse_single_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Parse `rev-parse --abbrev-ref HEAD`
pub fn parse_head_ref(output: &str) -> Option<HeadRef> {
    parse_single_line(output).map(|name| {
        if name == "HEAD" {
            HeadRef::Detached
        } else {
            HeadRef::Branch(name)
        }
    })
}

/// Parse `ls-remote origin refs/heads/<branch>`.
///
/// Returns the first whitespace-separated token, or `None` when the remote
/// has no such branch (empty output).
pub fn parse_ls_remote(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .next()
        .map(str::to_string)
}

/// Parse `rev-list --count <a>..<b>`
pub fn parse_count(output: &str) -> Result<u64, GitError> {
    let trimmed = output.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| GitError::UnexpectedOutput(format!("expected a commit count, got '{trimmed}'")))
}

/// Truncate a hash to [`SHORT_HASH_LEN`] characters
pub fn abbreviate(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
