//! Ahead/behind refinement
//!
//! The base collector can only tell `Clean` from `Unpushed`. Before pulling
//! or pushing, rows whose hashes differ are refined by fetching the remote
//! branch and counting commits in both directions.

use super::driver::run_bounded;
use super::{StatusRow, SyncState};
use crate::git::GitBackend;
use indicatif::ProgressBar;
use std::sync::Arc;
use tracing::{debug, warn};

/// State implied by commit counts in each direction
pub fn classify_divergence(ahead: u64, behind: u64) -> SyncState {
    match (ahead, behind) {
        (0, 0) => SyncState::Clean,
        (0, _) => SyncState::Pullable,
        (_, 0) => SyncState::Unpushed,
        _ => SyncState::Conflict,
    }
}

/// Refine one row in place of its base classification.
///
/// Rows that are detached or whose hashes match are returned unchanged, as
/// are rows where the fetch or either count fails.
pub async fn refine(mut row: StatusRow, git: &dyn GitBackend) -> StatusRow {
    let Some(branch) = row.branch.clone() else {
        return row;
    };
    if !row.hashes_differ() {
        return row;
    }

    if let Err(e) = git.fetch(&row.path, &branch).await {
        warn!("{}: fetch of {} failed: {}", row.name, branch, e);
        return row;
    }

    let ahead = git
        .count_commits(&row.path, &row.remote_hash, &row.local_hash)
        .await;
    let behind = git
        .count_commits(&row.path, &row.local_hash, &row.remote_hash)
        .await;

    match (ahead, behind) {
        (Ok(ahead), Ok(behind)) => {
            row.state = classify_divergence(ahead, behind);
            debug!("{}: {} ahead, {} behind -> {}", row.name, ahead, behind, row.state);
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("{}: could not compare with origin/{}: {}", row.name, branch, e);
        }
    }

    row
}

/// Refine every row with bounded parallelism, keeping name order
pub async fn refine_all(
    rows: Vec<StatusRow>,
    max_parallel: usize,
    git: Arc<dyn GitBackend>,
) -> Vec<StatusRow> {
    let mut refined = run_bounded(rows, max_parallel, &ProgressBar::hidden(), move |row| {
        let git = git.clone();
        async move { Some(refine(row, git.as_ref()).await) }
    })
    .await;

    refined.sort_by(|a, b| a.name.cmp(&b.name));
    refined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitCommandRunner;
    use crate::subprocess::{MockProcessRunner, ProcessRunner};
    use std::path::PathBuf;

    const LOCAL: &str = "1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const REMOTE: &str = "2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn row(name: &str, local: &str, remote: &str) -> StatusRow {
        StatusRow {
            name: name.to_string(),
            config_ref: "main".to_string(),
            local_ref: format!("main/{}", &local[..7.min(local.len())]),
            remote_ref: remote.chars().take(7).collect(),
            state: SyncState::Clean,
            path: PathBuf::from("/work").join(name),
            branch: Some("main".to_string()),
            detached: false,
            local_hash: local.to_string(),
            remote_hash: remote.to_string(),
        }
    }

    fn backend(mock: &MockProcessRunner) -> GitCommandRunner {
        GitCommandRunner::new(Arc::new(mock.clone()) as Arc<dyn ProcessRunner>)
    }

    fn expect_counts(mock: &mut MockProcessRunner, ahead: &str, behind: &str) {
        mock.expect_command("git")
            .with_exact_args(&["fetch", "origin", "main"])
            .returns_success()
            .finish();
        let ahead_range = format!("{REMOTE}..{LOCAL}");
        mock.expect_command("git")
            .with_args(move |args| args.last() == Some(&ahead_range))
            .returns_stdout(ahead)
            .finish();
        let behind_range = format!("{LOCAL}..{REMOTE}");
        mock.expect_command("git")
            .with_args(move |args| args.last() == Some(&behind_range))
            .returns_stdout(behind)
            .finish();
    }

    #[test]
    fn test_classify_divergence() {
        assert_eq!(classify_divergence(0, 0), SyncState::Clean);
        assert_eq!(classify_divergence(0, 4), SyncState::Pullable);
        assert_eq!(classify_divergence(2, 0), SyncState::Unpushed);
        assert_eq!(classify_divergence(2, 4), SyncState::Conflict);
    }

    #[tokio::test]
    async fn test_behind_only_is_pullable() {
        let mut mock = MockProcessRunner::new();
        expect_counts(&mut mock, "0\n", "3\n");

        let refined = refine(row("app", LOCAL, REMOTE), &backend(&mock)).await;

        assert_eq!(refined.state, SyncState::Pullable);
        assert_eq!(mock.calls_with_prefix(&["fetch"]).len(), 1);
    }

    #[tokio::test]
    async fn test_diverged_is_conflict() {
        let mut mock = MockProcessRunner::new();
        expect_counts(&mut mock, "1\n", "2\n");

        let refined = refine(row("app", LOCAL, REMOTE), &backend(&mock)).await;
        assert_eq!(refined.state, SyncState::Conflict);
    }

    #[tokio::test]
    async fn test_ahead_only_is_unpushed() {
        let mut mock = MockProcessRunner::new();
        expect_counts(&mut mock, "5\n", "0\n");

        let refined = refine(row("app", LOCAL, REMOTE), &backend(&mock)).await;
        assert_eq!(refined.state, SyncState::Unpushed);
    }

    #[tokio::test]
    async fn test_matching_hashes_skip_fetch() {
        let mock = MockProcessRunner::new();

        let refined = refine(row("app", LOCAL, LOCAL), &backend(&mock)).await;

        assert_eq!(refined.state, SyncState::Clean);
        assert!(mock.get_call_history().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_base_state() {
        let mut mock = MockProcessRunner::new();
        mock.expect_command("git")
            .returns_exit_code(128)
            .returns_stderr("fatal: unable to access 'https://example.com/app.git/'")
            .finish();

        let mut base = row("app", LOCAL, REMOTE);
        base.state = SyncState::Unpushed;
        let refined = refine(base, &backend(&mock)).await;

        assert_eq!(refined.state, SyncState::Unpushed);
        assert!(mock.calls_with_prefix(&["rev-list"]).is_empty());
    }

    #[tokio::test]
    async fn test_refine_all_keeps_name_order() {
        let mut mock = MockProcessRunner::new();
        expect_counts(&mut mock, "0\n", "1\n");

        let rows = vec![
            row("zulu", LOCAL, REMOTE),
            row("alpha", LOCAL, LOCAL),
            row("mike", LOCAL, REMOTE),
        ];
        let refined = refine_all(rows, 2, Arc::new(backend(&mock))).await;

        let summary: Vec<(&str, SyncState)> =
            refined.iter().map(|r| (r.name.as_str(), r.state)).collect();
        assert_eq!(
            summary,
            vec![
                ("alpha", SyncState::Clean),
                ("mike", SyncState::Pullable),
                ("zulu", SyncState::Pullable),
            ]
        );
    }
}
