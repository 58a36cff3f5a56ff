//! Markdown rendering of an [`ActivityReport`].
//!
//! The layout is fixed: header, commits, uncommitted changes, pull requests,
//! footer. Every section has a fallback line so an empty report still renders
//! the full skeleton. Rendering never fails.

use chrono::{Local, NaiveDateTime};
use standup_core::{ActivityReport, Messages};

/// Render `report` with the current local time in the header.
pub fn render(report: &ActivityReport, messages: &Messages) -> String {
    render_at(report, messages, Local::now().naive_local())
}

/// Render `report` with a fixed header timestamp.
pub fn render_at(report: &ActivityReport, messages: &Messages, now: NaiveDateTime) -> String {
    let mut output = String::new();

    push_header(&mut output, report, messages, now);
    push_commits(&mut output, report, messages);
    push_diffs(&mut output, report, messages);
    push_pull_requests(&mut output, report, messages);

    output.push_str(&format!("\n---\n\n{}\n", messages.footer));

    output
}

fn push_header(
    output: &mut String,
    report: &ActivityReport,
    messages: &Messages,
    now: NaiveDateTime,
) {
    let remote = if report.remote_url.is_empty() {
        messages.unknown_remote
    } else {
        report.remote_url.as_str()
    };

    output.push_str(&format!(
        "# {}: {}\n",
        messages.report_title, report.repo_name
    ));
    output.push_str(&format!(
        "- **{}**: {}\n",
        messages.label_datetime,
        now.format(messages.timestamp_format)
    ));
    output.push_str(&format!(
        "- **{}**: {}\n",
        messages.label_branch, report.branch
    ));
    output.push_str(&format!("- **{}**: {}\n", messages.label_repository, remote));
    output.push_str(&format!(
        "- **{}**: {}{}{}\n",
        messages.label_window, messages.window_prefix, report.window_hours, messages.window_suffix
    ));
    output.push_str(&format!("\n---\n\n## {}\n", messages.commits_heading));
}

fn push_commits(output: &mut String, report: &ActivityReport, messages: &Messages) {
    if !report.has_commits() {
        output.push_str(messages.no_commits);
        output.push('\n');
        return;
    }

    output.push_str(&fenced("", &report.commit_summary));
    output.push_str(&format!("\n### {}\n", messages.commit_details_heading));
    output.push_str(&fenced("", &report.commit_detail));
}

fn push_diffs(output: &mut String, report: &ActivityReport, messages: &Messages) {
    output.push_str(&format!("\n---\n\n## {}\n", messages.diff_heading));

    if report.working_tree_diff_summary.is_empty() {
        output.push_str(messages.no_diff);
        output.push('\n');
    } else {
        output.push_str(&fenced("", &report.working_tree_diff_summary));
        output.push_str(&format!("\n### {}\n", messages.diff_body_heading));
        output.push_str(&fenced("diff", &report.working_tree_diff_body));
    }

    // Staged changes are only mentioned when there are some
    if !report.staged_diff_summary.is_empty() {
        output.push_str(&format!("\n### {}\n", messages.staged_heading));
        output.push_str(&fenced("", &report.staged_diff_summary));
    }
}

fn push_pull_requests(output: &mut String, report: &ActivityReport, messages: &Messages) {
    output.push_str(&format!("\n---\n\n## {}\n", messages.pr_heading));

    let sections = [
        (
            messages.open_prs_heading,
            &report.open_pull_requests,
            messages.no_open_prs,
        ),
        (
            messages.merged_prs_heading,
            &report.merged_pull_requests,
            messages.no_merged_prs,
        ),
        (
            messages.review_prs_heading,
            &report.review_requested_pull_requests,
            messages.no_review_prs,
        ),
    ];

    for (i, (heading, body, fallback)) in sections.into_iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("### {}\n", heading));
        if body.is_empty() {
            output.push_str(fallback);
            output.push('\n');
        } else {
            output.push_str(body);
        }
    }
}

/// A fenced code block, closed with a trailing newline.
fn fenced(language: &str, body: &str) -> String {
    format!("```{}\n{}\n```\n", language, body)
}
