//! Report pipeline: collect repository activity, render it as Markdown.
//!
//! Every entry point (the MCP tool, resource and prompts, and the `report`
//! CLI command) goes through [`ReportPipeline::generate`].
//!
//! # Example
//!
//! ```ignore
//! use standup_pipeline::ReportPipeline;
//!
//! let pipeline = ReportPipeline::new(collector, Locale::Ja.messages());
//! let markdown = pipeline.generate(".", 24.0).await?;
//! ```

pub mod markdown;

pub use markdown::{render, render_at};

use standup_core::{ActivityReport, Collector, Messages, Result};

/// Collect → render, shared by every surface.
#[derive(Clone)]
pub struct ReportPipeline {
    collector: Collector,
    messages: &'static Messages,
}

impl ReportPipeline {
    /// Create a pipeline rendering with the given text table.
    pub fn new(collector: Collector, messages: &'static Messages) -> Self {
        Self {
            collector,
            messages,
        }
    }

    /// Text table used for rendering.
    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    /// Raw activity for the last `window_hours` hours, without rendering.
    pub async fn collect(&self, repo_path: &str, window_hours: f64) -> Result<ActivityReport> {
        self.collector.collect(repo_path, window_hours).await
    }

    /// Markdown report for the last `window_hours` hours of `repo_path`.
    pub async fn generate(&self, repo_path: &str, window_hours: f64) -> Result<String> {
        let report = self.collect(repo_path, window_hours).await?;
        let markdown = render(&report, self.messages);

        tracing::debug!(
            repo = %report.repo_name,
            bytes = markdown.len(),
            "Report rendered"
        );

        Ok(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use standup_core::{Error, Locale, RepositoryQueryPort};
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Port where only git answers; every `gh` query fails.
    struct GitOnly;

    fn gh_missing() -> Result<String> {
        Err(Error::CommandFailed {
            program: "gh".to_string(),
            code: 127,
            stderr: "gh: command not found".to_string(),
        })
    }

    #[async_trait]
    impl RepositoryQueryPort for GitOnly {
        async fn toplevel(&self, _repo: &Path) -> Result<String> {
            Ok("/work/standup-tools".to_string())
        }
        async fn current_branch(&self, _repo: &Path) -> Result<String> {
            Ok("main".to_string())
        }
        async fn remote_url(&self, _repo: &Path) -> Result<String> {
            gh_missing()
        }
        async fn commit_summary(&self, _repo: &Path, _since: &str) -> Result<String> {
            Ok("abc1234 Add pipeline".to_string())
        }
        async fn commit_detail(&self, _repo: &Path, _since: &str) -> Result<String> {
            Ok("commit abc1234 - Add pipeline (1 hour ago)\n\n src/lib.rs | 5 +++++".to_string())
        }
        async fn working_tree_diff_stat(&self, _repo: &Path) -> Result<String> {
            Ok(String::new())
        }
        async fn working_tree_diff(&self, _repo: &Path) -> Result<String> {
            Ok(String::new())
        }
        async fn staged_diff_stat(&self, _repo: &Path) -> Result<String> {
            Ok(String::new())
        }
        async fn open_pull_requests(&self, _repo: &Path) -> Result<String> {
            gh_missing()
        }
        async fn merged_pull_requests(&self, _repo: &Path, _limit: u32) -> Result<String> {
            gh_missing()
        }
        async fn review_requested_pull_requests(&self, _repo: &Path) -> Result<String> {
            gh_missing()
        }
    }

    fn pipeline(locale: Locale) -> ReportPipeline {
        ReportPipeline::new(Collector::new(Arc::new(GitOnly)), locale.messages())
    }

    fn git_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_generate_without_gh() {
        let dir = git_dir();
        let md = pipeline(Locale::Ja)
            .generate(dir.path().to_str().unwrap(), 24.0)
            .await
            .unwrap();

        assert!(md.starts_with("# 📋 スタンドアップ情報: standup-tools\n"));
        assert!(md.contains("- **リポジトリ**: Unknown\n"));
        assert!(md.contains("```\nabc1234 Add pipeline\n```"));
        assert!(md.contains("オープン中のPRはありません。"));
        assert!(md.contains("最近マージされたPRはありません。"));
        assert!(md.contains("レビュー待ちのPRはありません。"));
    }

    #[tokio::test]
    async fn test_generate_propagates_validation_errors() {
        let dir = TempDir::new().unwrap();
        let err = pipeline(Locale::En)
            .generate(dir.path().to_str().unwrap(), 24.0)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotAGitRepository(_)));
    }

    #[tokio::test]
    async fn test_collect_returns_raw_report() {
        let dir = git_dir();
        let report = pipeline(Locale::En)
            .collect(dir.path().to_str().unwrap(), 6.0)
            .await
            .unwrap();

        assert_eq!(report.repo_name, "standup-tools");
        assert_eq!(report.commit_summary, "abc1234 Add pipeline");
        assert_eq!(report.window_hours, 6.0);
        assert!(report.remote_url.is_empty());
    }
}
