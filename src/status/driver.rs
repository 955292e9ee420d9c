//! Bounded parallel fan-out
//!
//! One task per repository; a semaphore caps how many run git at once and a
//! shared accumulator receives whatever each task produces. The driver always
//! waits for every task.

use super::{collector, StatusRow};
use crate::git::GitReader;
use crate::manifest::Repository;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};

/// Run `task` over every item with at most `max_parallel` in flight.
///
/// Results arrive in completion order; `None` results are dropped. A task
/// that panics is logged and contributes nothing.
pub async fn run_bounded<T, R, F, Fut>(
    items: Vec<T>,
    max_parallel: usize,
    progress: &ProgressBar,
    task: F,
) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<R>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    let results = Arc::new(Mutex::new(Vec::with_capacity(items.len())));
    let task = Arc::new(task);

    let handles = items.into_iter().map(|item| {
        let semaphore = semaphore.clone();
        let results = results.clone();
        let task = task.clone();
        let progress = progress.clone();

        tokio::spawn(async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire_owned().await.ok();
            if let Some(result) = task(item).await {
                results.lock().await.push(result);
            }
            progress.inc(1);
        })
    });

    for joined in join_all(handles).await {
        if let Err(e) = joined {
            warn!("Worker task failed: {}", e);
        }
    }

    let mut results = results.lock().await;
    std::mem::take(&mut *results)
}

/// Collect status rows for every repository, sorted by display name.
///
/// Repositories without a checkout are skipped.
pub async fn collect_all(
    repos: &[Repository],
    root: PathBuf,
    max_parallel: usize,
    git: Arc<dyn GitReader>,
    show_progress: bool,
) -> Vec<StatusRow> {
    debug!(
        "Collecting status for {} repositories ({} workers)",
        repos.len(),
        max_parallel
    );

    let progress = create_progress_bar(repos.len(), show_progress);
    let root = Arc::new(root);

    let mut rows = run_bounded(repos.to_vec(), max_parallel, &progress, move |repo| {
        let root = root.clone();
        let git = git.clone();
        async move { collector::collect(&repo, &root, git.as_ref()).await }
    })
    .await;

    progress.finish_and_clear();

    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

/// Progress bar on stderr, hidden unless requested
pub fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}
