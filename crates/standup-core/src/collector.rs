//! Collects an [`ActivityReport`] for one repository.
//!
//! Validation failures are the only errors surfaced. Every query after that
//! is best-effort: a failing `gh` must never hide the commit history.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::port::RepositoryQueryPort;
use crate::types::{ActivityReport, DIFF_LINE_LIMIT, MERGED_PR_LIMIT};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Gathers repository activity through a [`RepositoryQueryPort`].
#[derive(Clone)]
pub struct Collector {
    port: Arc<dyn RepositoryQueryPort>,
}

impl Collector {
    /// Create a collector backed by the given query adapter.
    pub fn new(port: Arc<dyn RepositoryQueryPort>) -> Self {
        Self { port }
    }

    /// Collect activity for the last `window_hours` hours.
    pub async fn collect(&self, repo_path: &str, window_hours: f64) -> Result<ActivityReport> {
        self.collect_at(repo_path, window_hours, Utc::now()).await
    }

    /// Collect activity for the window ending at `now`.
    pub async fn collect_at(
        &self,
        repo_path: &str,
        window_hours: f64,
        now: DateTime<Utc>,
    ) -> Result<ActivityReport> {
        let repo = resolve_repository(repo_path)?;
        let since = cutoff_timestamp(now, window_hours);

        info!(repo = %repo.display(), window_hours, since = %since, "Collecting activity");

        let port = self.port.as_ref();
        let repo = repo.as_path();

        let (
            toplevel,
            branch,
            remote_url,
            commit_summary,
            commit_detail,
            diff_stat,
            diff_body,
            staged_stat,
            open_prs,
            merged_prs,
            review_prs,
        ) = tokio::join!(
            best_effort("toplevel", port.toplevel(repo)),
            best_effort("current_branch", port.current_branch(repo)),
            best_effort("remote_url", port.remote_url(repo)),
            best_effort("commit_summary", port.commit_summary(repo, &since)),
            best_effort("commit_detail", port.commit_detail(repo, &since)),
            best_effort("working_tree_diff_stat", port.working_tree_diff_stat(repo)),
            best_effort("working_tree_diff", port.working_tree_diff(repo)),
            best_effort("staged_diff_stat", port.staged_diff_stat(repo)),
            best_effort("open_pull_requests", port.open_pull_requests(repo)),
            best_effort(
                "merged_pull_requests",
                port.merged_pull_requests(repo, MERGED_PR_LIMIT)
            ),
            best_effort(
                "review_requested_pull_requests",
                port.review_requested_pull_requests(repo)
            ),
        );

        let report = ActivityReport {
            repo_name: last_segment(&toplevel),
            branch,
            remote_url,
            window_hours,
            commit_summary,
            commit_detail,
            working_tree_diff_summary: diff_stat,
            working_tree_diff_body: truncate_lines(&diff_body, DIFF_LINE_LIMIT).to_string(),
            staged_diff_summary: staged_stat,
            open_pull_requests: open_prs,
            merged_pull_requests: merged_prs,
            review_requested_pull_requests: review_prs,
        };

        debug!(
            repo = %report.repo_name,
            commits = report.commit_count(),
            "Activity collected"
        );

        Ok(report)
    }
}

/// Resolve `repo_path` and check it is a working tree.
///
/// Existence is checked before the `.git` entry. Errors carry the path as
/// the caller wrote it.
fn resolve_repository(repo_path: &str) -> Result<PathBuf> {
    let given = PathBuf::from(repo_path);
    let absolute =
        std::path::absolute(&given).map_err(|_| Error::InvalidRepository(given.clone()))?;

    if !absolute.exists() {
        return Err(Error::InvalidRepository(given));
    }
    if !absolute.join(".git").exists() {
        return Err(Error::NotAGitRepository(given));
    }

    Ok(absolute)
}

/// ISO-8601 UTC timestamp `window_hours` before `now`, in milliseconds.
///
/// A non-finite or non-positive window collapses to `now`. A window reaching
/// past what a timestamp can hold saturates at the Unix epoch.
pub fn cutoff_timestamp(now: DateTime<Utc>, window_hours: f64) -> String {
    let millis = if window_hours.is_finite() && window_hours > 0.0 {
        (window_hours * MILLIS_PER_HOUR).round()
    } else {
        0.0
    };

    let cutoff = if millis >= i64::MAX as f64 {
        None
    } else {
        TimeDelta::try_milliseconds(millis as i64).and_then(|delta| now.checked_sub_signed(delta))
    };

    cutoff
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Keep at most the first `max_lines` lines of `text`.
pub fn truncate_lines(text: &str, max_lines: usize) -> &str {
    if max_lines == 0 {
        return "";
    }
    match text.match_indices('\n').nth(max_lines - 1) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn last_segment(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn best_effort<F>(query: &'static str, fut: F) -> String
where
    F: Future<Output = Result<String>>,
{
    match fut.await {
        Ok(output) => output.trim().to_string(),
        Err(e) => {
            debug!(query, error = %e, "Query failed, using empty output");
            String::new()
        }
    }
}
