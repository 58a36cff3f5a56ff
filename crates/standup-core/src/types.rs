//! The activity report produced by one collection run.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Recent repository activity, gathered once per request.
///
/// Every text field holds the trimmed output of one query, or an empty
/// string when that query failed or printed nothing. A report is never
/// mutated after the collector builds it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    /// Last path segment of the repository top-level directory
    pub repo_name: String,
    /// Current branch; empty when detached
    pub branch: String,
    /// Hosted-remote URL; empty when `gh` is missing or unauthenticated
    pub remote_url: String,
    /// Requested lookback window in hours
    pub window_hours: f64,
    /// One line per non-merge commit inside the window
    pub commit_summary: String,
    /// Same commits with per-file change statistics
    pub commit_detail: String,
    /// `--stat` of unstaged changes
    pub working_tree_diff_summary: String,
    /// Patch text of unstaged changes, at most [`DIFF_LINE_LIMIT`] lines
    pub working_tree_diff_body: String,
    /// `--stat` of staged changes
    pub staged_diff_summary: String,
    pub open_pull_requests: String,
    pub merged_pull_requests: String,
    pub review_requested_pull_requests: String,
}

/// Maximum number of diff-body lines kept in a report.
pub const DIFF_LINE_LIMIT: usize = 200;

/// Number of merged pull requests listed.
pub const MERGED_PR_LIMIT: u32 = 5;

impl ActivityReport {
    /// A report with no activity, only the window set.
    pub fn empty(window_hours: f64) -> Self {
        Self {
            window_hours,
            ..Default::default()
        }
    }

    /// Whether the window saw any non-merge commits.
    pub fn has_commits(&self) -> bool {
        !self.commit_summary.is_empty()
    }

    /// Number of commit lines in the summary.
    pub fn commit_count(&self) -> usize {
        self.commit_summary.lines().count()
    }

    /// Pretty-printed JSON of the raw report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = ActivityReport::empty(24.0);
        assert_eq!(report.window_hours, 24.0);
        assert!(report.repo_name.is_empty());
        assert!(!report.has_commits());
        assert_eq!(report.commit_count(), 0);
    }

    #[test]
    fn test_commit_count() {
        let report = ActivityReport {
            commit_summary: "abc1234 Add parser\ndef5678 Fix tests".to_string(),
            ..ActivityReport::empty(8.0)
        };
        assert!(report.has_commits());
        assert_eq!(report.commit_count(), 2);
    }

    #[test]
    fn test_serializes_every_field() {
        let json = serde_json::to_value(ActivityReport::empty(1.5)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 12);
        assert_eq!(object["window_hours"], 1.5);
        assert_eq!(object["remote_url"], "");
    }

    #[test]
    fn test_to_json_keeps_raw_fields() {
        let report = ActivityReport {
            repo_name: "standup-tools".to_string(),
            commit_summary: "abc1234 Add parser".to_string(),
            ..ActivityReport::empty(12.0)
        };

        let json = report.to_json().unwrap();
        assert!(json.contains("\"repo_name\": \"standup-tools\""));
        assert!(json.contains("\"window_hours\": 12.0"));

        let parsed: ActivityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
