//! User-facing text tables.
//!
//! Every heading, fallback line, prompt template, and protocol description
//! lives in a [`Messages`] table keyed by [`Locale`]. The table is chosen once
//! at startup and passed by reference to whatever renders text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Supported output languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Japanese (default)
    #[default]
    Ja,
    /// English
    En,
}

impl Locale {
    /// Text table for this locale.
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ja => f.write_str("ja"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Locale::Ja),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(Error::Config(format!(
                "Unsupported locale '{}': expected 'ja' or 'en'",
                other
            ))),
        }
    }
}

/// Conversation wrapper placed around a report by a prompt template.
#[derive(Debug)]
pub struct PromptText {
    /// Description of the prompt in `prompts/list`
    pub description: &'static str,
    /// Description attached to a `prompts/get` result
    pub result_description: &'static str,
    pub greeting: &'static str,
    pub context: &'static str,
    pub steps_intro: &'static str,
    pub steps: &'static [&'static str],
    pub closing: &'static str,
}

/// All user-facing strings for one locale.
#[derive(Debug)]
pub struct Messages {
    /// `chrono` format string for the report timestamp
    pub timestamp_format: &'static str,

    // Report header
    pub report_title: &'static str,
    pub label_datetime: &'static str,
    pub label_branch: &'static str,
    pub label_repository: &'static str,
    pub label_window: &'static str,
    pub window_prefix: &'static str,
    pub window_suffix: &'static str,
    pub unknown_remote: &'static str,

    // Commits
    pub commits_heading: &'static str,
    pub no_commits: &'static str,
    pub commit_details_heading: &'static str,

    // Diffs
    pub diff_heading: &'static str,
    pub no_diff: &'static str,
    pub diff_body_heading: &'static str,
    pub staged_heading: &'static str,

    // Pull requests
    pub pr_heading: &'static str,
    pub open_prs_heading: &'static str,
    pub no_open_prs: &'static str,
    pub merged_prs_heading: &'static str,
    pub no_merged_prs: &'static str,
    pub review_prs_heading: &'static str,
    pub no_review_prs: &'static str,
    /// Label before the update time in an open-PR line
    pub pr_updated_label: &'static str,
    /// Label before the merge time in a merged-PR line
    pub pr_merged_label: &'static str,

    pub footer: &'static str,

    // Protocol surfaces
    pub tool_description: &'static str,
    pub repo_path_description: &'static str,
    pub since_hours_description: &'static str,
    pub work_hours_description: &'static str,
    pub resource_name: &'static str,
    pub resource_description: &'static str,
    pub tool_error_prefix: &'static str,
    pub fetch_error_prefix: &'static str,

    pub morning: PromptText,
    pub evening: PromptText,
}

static JA: Messages = Messages {
    timestamp_format: "%Y/%m/%d %-H:%M:%S",

    report_title: "📋 スタンドアップ情報",
    label_datetime: "日時",
    label_branch: "ブランチ",
    label_repository: "リポジトリ",
    label_window: "集計期間",
    window_prefix: "過去 ",
    window_suffix: " 時間",
    unknown_remote: "Unknown",

    commits_heading: "📝 コミット履歴",
    no_commits: "直近のコミットはありません。",
    commit_details_heading: "変更の詳細",

    diff_heading: "🔀 コード差分（未コミットの変更）",
    no_diff: "未コミットの変更はありません。",
    diff_body_heading: "差分の内容（先頭200行）",
    staged_heading: "ステージ済みの変更",

    pr_heading: "🔃 Pull Requests",
    open_prs_heading: "オープン中のPR（自分）",
    no_open_prs: "オープン中のPRはありません。",
    merged_prs_heading: "最近マージされたPR",
    no_merged_prs: "最近マージされたPRはありません。",
    review_prs_heading: "レビュー依頼されているPR",
    no_review_prs: "レビュー待ちのPRはありません。",
    pr_updated_label: "更新",
    pr_merged_label: "マージ",

    footer: "> このサマリーを Claude の会話に貼り付けて、音声モードで朝会・夕会を始めましょう！",

    tool_description: "GitHub リポジトリから朝会・夕会用の情報を収集します。コミット履歴、差分、PR情報などを取得し、Markdown形式で返します。",
    repo_path_description: "Git リポジトリのパス（絶対パスまたは相対パス）",
    since_hours_description: "何時間前からの情報を収集するか（デフォルト: 24時間）",
    work_hours_description: "今日の作業時間（デフォルト: 10時間）",
    resource_name: "Current Directory Standup Info",
    resource_description: "現在のディレクトリのスタンドアップ情報（過去24時間）",
    tool_error_prefix: "エラーが発生しました",
    fetch_error_prefix: "スタンドアップ情報の取得に失敗しました",

    morning: PromptText {
        description: "朝会用のプロンプト。GitHub情報を元に今日の作業を計画します。",
        result_description: "朝会用のプロンプトとGitHub情報",
        greeting: "おはようございます！今日の朝会を始めましょう。",
        context: "以下は昨日からの作業状況です：",
        steps_intro: "このGitHub情報を踏まえて：",
        steps: &[
            "昨日の作業を簡潔にまとめてください",
            "今日の予定や目標について聞いてください",
            "困っていることや相談したいことを確認してください",
            "最後に今日のアクションアイテムを整理してください",
        ],
        closing: "音声モードで自然な会話として進めてください。",
    },
    evening: PromptText {
        description: "夕会用のプロンプト。今日の作業を振り返ります。",
        result_description: "夕会用のプロンプトとGitHub情報",
        greeting: "おつかれさまです！今日の振り返りをしましょう。",
        context: "以下は今日の作業状況です：",
        steps_intro: "このGitHub情報を踏まえて：",
        steps: &[
            "今日の作業を要約してください",
            "今日の手応えについて聞いてください",
            "明日に持ち越すことを確認してください",
            "簡単な日報サマリーをまとめてください",
        ],
        closing: "音声モードで自然な会話として進めてください。",
    },
};

static EN: Messages = Messages {
    timestamp_format: "%-m/%-d/%Y, %-I:%M:%S %p",

    report_title: "📋 Standup Info",
    label_datetime: "Date",
    label_branch: "Branch",
    label_repository: "Repository",
    label_window: "Window",
    window_prefix: "Last ",
    window_suffix: " hours",
    unknown_remote: "Unknown",

    commits_heading: "📝 Commit History",
    no_commits: "No recent commits.",
    commit_details_heading: "Change Details",

    diff_heading: "🔀 Code Diff (Uncommitted Changes)",
    no_diff: "No uncommitted changes.",
    diff_body_heading: "Diff Content (first 200 lines)",
    staged_heading: "Staged Changes",

    pr_heading: "🔃 Pull Requests",
    open_prs_heading: "Open PRs (mine)",
    no_open_prs: "No open PRs.",
    merged_prs_heading: "Recently Merged PRs",
    no_merged_prs: "No recently merged PRs.",
    review_prs_heading: "PRs Awaiting My Review",
    no_review_prs: "No PRs awaiting review.",
    pr_updated_label: "updated",
    pr_merged_label: "merged",

    footer: "> Paste this summary into a Claude conversation and start your standup in voice mode!",

    tool_description: "Collects standup information from a GitHub repository: commit history, diffs, and pull requests, returned as Markdown.",
    repo_path_description: "Path to the Git repository (absolute or relative)",
    since_hours_description: "How many hours back to collect (default: 24)",
    work_hours_description: "Hours worked today (default: 10)",
    resource_name: "Current Directory Standup Info",
    resource_description: "Standup info for the current directory (last 24 hours)",
    tool_error_prefix: "An error occurred",
    fetch_error_prefix: "Failed to collect standup info",

    morning: PromptText {
        description: "Morning standup prompt. Plans today's work from GitHub activity.",
        result_description: "Morning standup prompt with GitHub activity",
        greeting: "Good morning! Let's start today's standup.",
        context: "Here is the work status since yesterday:",
        steps_intro: "Based on this GitHub activity:",
        steps: &[
            "Briefly summarize yesterday's work",
            "Ask about today's plans and goals",
            "Check for blockers or anything to discuss",
            "Finally, organize today's action items",
        ],
        closing: "Please run this as a natural conversation in voice mode.",
    },
    evening: PromptText {
        description: "Evening standup prompt. Reviews today's work.",
        result_description: "Evening standup prompt with GitHub activity",
        greeting: "Good work today! Let's look back on the day.",
        context: "Here is today's work status:",
        steps_intro: "Based on this GitHub activity:",
        steps: &[
            "Summarize today's work",
            "Ask how today went",
            "Confirm what carries over to tomorrow",
            "Put together a short daily report",
        ],
        closing: "Please run this as a natural conversation in voice mode.",
    },
};
