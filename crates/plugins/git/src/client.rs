//! `git` + `gh` implementation of the repository query port.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use standup_core::types::DIFF_LINE_LIMIT;
use standup_core::{CommandsConfig, Messages, RepositoryQueryPort, Result};

use crate::command::CommandRunner;

/// Header format of each commit in the detailed log.
const COMMIT_DETAIL_FORMAT: &str = "--format=commit %h - %s (%ar)";

/// Query adapter that shells out to `git` and the GitHub CLI.
#[derive(Debug, Clone)]
pub struct CliRepositoryQuery {
    git: CommandRunner,
    gh: CommandRunner,
    messages: &'static Messages,
}

impl CliRepositoryQuery {
    /// Create an adapter from explicit runners.
    pub fn new(git: CommandRunner, gh: CommandRunner, messages: &'static Messages) -> Self {
        Self { git, gh, messages }
    }

    /// Create an adapter from the `[commands]` config section.
    pub fn from_config(config: &CommandsConfig, messages: &'static Messages) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self::new(
            CommandRunner::new(&config.git, timeout),
            CommandRunner::new(&config.gh, timeout),
            messages,
        )
    }

    fn open_pr_template(&self) -> String {
        pr_template(&format!(
            "{}: {{{{.updatedAt}}}}",
            self.messages.pr_updated_label
        ))
    }

    fn merged_pr_template(&self) -> String {
        pr_template(&format!(
            "{}: {{{{.mergedAt}}}}",
            self.messages.pr_merged_label
        ))
    }
}

/// `gh` Go template printing one two-line entry per pull request.
fn pr_template(status: &str) -> String {
    format!(
        "{{{{range .}}}}- #{{{{.number}}}} {{{{.title}}}} ({})\n  {{{{.url}}}}\n{{{{end}}}}",
        status
    )
}

fn since_arg(since: &str) -> String {
    format!("--since={}", since)
}

#[async_trait]
impl RepositoryQueryPort for CliRepositoryQuery {
    async fn toplevel(&self, repo: &Path) -> Result<String> {
        self.git.run(&["rev-parse", "--show-toplevel"], repo).await
    }

    async fn current_branch(&self, repo: &Path) -> Result<String> {
        self.git.run(&["branch", "--show-current"], repo).await
    }

    async fn remote_url(&self, repo: &Path) -> Result<String> {
        self.gh
            .run(&["repo", "view", "--json", "url", "-q", ".url"], repo)
            .await
    }

    async fn commit_summary(&self, repo: &Path, since: &str) -> Result<String> {
        let since = since_arg(since);
        self.git
            .run(&["log", &since, "--oneline", "--no-merges"], repo)
            .await
    }

    async fn commit_detail(&self, repo: &Path, since: &str) -> Result<String> {
        let since = since_arg(since);
        self.git
            .run(
                &["log", &since, "--no-merges", "--stat", COMMIT_DETAIL_FORMAT],
                repo,
            )
            .await
    }

    async fn working_tree_diff_stat(&self, repo: &Path) -> Result<String> {
        self.git.run(&["diff", "--stat"], repo).await
    }

    async fn working_tree_diff(&self, repo: &Path) -> Result<String> {
        self.git.run_head(&["diff"], repo, DIFF_LINE_LIMIT).await
    }

    async fn staged_diff_stat(&self, repo: &Path) -> Result<String> {
        self.git.run(&["diff", "--cached", "--stat"], repo).await
    }

    async fn open_pull_requests(&self, repo: &Path) -> Result<String> {
        let template = self.open_pr_template();
        self.gh
            .run(
                &[
                    "pr",
                    "list",
                    "--author=@me",
                    "--state=open",
                    "--json",
                    "number,title,updatedAt,url",
                    "--template",
                    &template,
                ],
                repo,
            )
            .await
    }

    async fn merged_pull_requests(&self, repo: &Path, limit: u32) -> Result<String> {
        let template = self.merged_pr_template();
        let limit = limit.to_string();
        self.gh
            .run(
                &[
                    "pr",
                    "list",
                    "--author=@me",
                    "--state=merged",
                    "--limit",
                    &limit,
                    "--json",
                    "number,title,mergedAt,url",
                    "--template",
                    &template,
                ],
                repo,
            )
            .await
    }

    async fn review_requested_pull_requests(&self, repo: &Path) -> Result<String> {
        let template = pr_template("by {{.author.login}}");
        self.gh
            .run(
                &[
                    "pr",
                    "list",
                    "--search",
                    "review-requested:@me",
                    "--state=open",
                    "--json",
                    "number,title,author,url",
                    "--template",
                    &template,
                ],
                repo,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standup_core::Locale;

    fn adapter(locale: Locale) -> CliRepositoryQuery {
        CliRepositoryQuery::from_config(&CommandsConfig::default(), locale.messages())
    }

    #[test]
    fn test_open_pr_template_uses_locale_label() {
        assert_eq!(
            adapter(Locale::Ja).open_pr_template(),
            "{{range .}}- #{{.number}} {{.title}} (更新: {{.updatedAt}})\n  {{.url}}\n{{end}}"
        );
        assert!(adapter(Locale::En)
            .open_pr_template()
            .contains("(updated: {{.updatedAt}})"));
    }

    #[test]
    fn test_merged_pr_template() {
        assert_eq!(
            adapter(Locale::Ja).merged_pr_template(),
            "{{range .}}- #{{.number}} {{.title}} (マージ: {{.mergedAt}})\n  {{.url}}\n{{end}}"
        );
    }

    #[test]
    fn test_review_template() {
        assert_eq!(
            pr_template("by {{.author.login}}"),
            "{{range .}}- #{{.number}} {{.title}} (by {{.author.login}})\n  {{.url}}\n{{end}}"
        );
    }

    #[test]
    fn test_from_config_programs() {
        let config = CommandsConfig {
            git: "/usr/bin/git".to_string(),
            gh: "gh-enterprise".to_string(),
            timeout_secs: 3,
        };
        let adapter = CliRepositoryQuery::from_config(&config, Locale::Ja.messages());
        assert_eq!(adapter.git.program(), "/usr/bin/git");
        assert_eq!(adapter.gh.program(), "gh-enterprise");
    }
}
