//! Port for the read-only repository queries behind a report.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// One method per query the collector issues.
///
/// Implementations return the raw (trimmed) text output of each query. They
/// are free to fail; the collector turns every error into an empty string.
/// All paths passed in are absolute and already validated as working trees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryQueryPort: Send + Sync {
    /// Absolute path of the repository top-level directory.
    async fn toplevel(&self, repo: &Path) -> Result<String>;

    /// Name of the checked-out branch.
    async fn current_branch(&self, repo: &Path) -> Result<String>;

    /// URL of the hosted repository.
    async fn remote_url(&self, repo: &Path) -> Result<String>;

    /// One line per non-merge commit since `since` (ISO-8601).
    async fn commit_summary(&self, repo: &Path, since: &str) -> Result<String>;

    /// Non-merge commits since `since` with per-file statistics.
    async fn commit_detail(&self, repo: &Path, since: &str) -> Result<String>;

    /// Change statistics of unstaged modifications.
    async fn working_tree_diff_stat(&self, repo: &Path) -> Result<String>;

    /// Patch text of unstaged modifications.
    async fn working_tree_diff(&self, repo: &Path) -> Result<String>;

    /// Change statistics of staged modifications.
    async fn staged_diff_stat(&self, repo: &Path) -> Result<String>;

    /// Open pull requests authored by the current user, one entry per PR.
    async fn open_pull_requests(&self, repo: &Path) -> Result<String>;

    /// The `limit` most recently merged pull requests of the current user.
    async fn merged_pull_requests(&self, repo: &Path, limit: u32) -> Result<String>;

    /// Open pull requests requesting the current user's review.
    async fn review_requested_pull_requests(&self, repo: &Path) -> Result<String>;
}
