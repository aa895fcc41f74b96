// Rust guideline compliant 2026-10-17

//! Text rendering of command results.
//!
//! Every renderer writes to a [`WriteColor`] so the same code serves the
//! terminal and in-memory buffers.

use crate::terminal::write_colored;
use modrel_app::{CheckResponse, CleanOutcome, CommentOutcome, CreateOutcome};
use modrel_core::{
    CheckOutcome, CheckReport, IssueInfo, IssueStatus, ProgressTier, SkippedItem, WebLinks,
};
use serde::Serialize;
use std::io::{self, Write};
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, WriteColor};

/// Marker of open issues.
pub const OPEN_ISSUE: &str = "🟢";
/// Marker of closed issues.
pub const CLOSED_ISSUE: &str = "🟣";
/// Marker of issues still in progress.
pub const IN_PROGRESS: &str = "🚧";
/// Marker of issues under test.
pub const TESTING: &str = "🔨";
/// Marker of verified issues.
pub const VERIFIED: &str = "✅";

/// Prints a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Returns the message shown when the branch head is already released.
#[must_use]
pub fn nothing_to_release_message(tag: &str, branch: &str) -> String {
    format!(
        "The latest release tag {} is the HEAD of the {} branch, there is nothing to release",
        tag, branch
    )
}

fn status_marker(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Open => OPEN_ISSUE,
        IssueStatus::Closed => CLOSED_ISSUE,
    }
}

fn progress_marker(progress: ProgressTier) -> &'static str {
    match progress {
        ProgressTier::InProgress => IN_PROGRESS,
        ProgressTier::Testing => TESTING,
        ProgressTier::Verified => VERIFIED,
    }
}

fn issue_line(info: &IssueInfo, url: &str, depth: usize) -> String {
    let line = if depth == 0 {
        format!(
            "{:<6}{} {} {:<45} ({}) {}",
            "",
            status_marker(info.status),
            progress_marker(info.progress),
            url,
            info.ref_count,
            info.labels
        )
    } else {
        format!(
            "{:<2}{:<2} {} {:<45} ({}) {}",
            "└─",
            status_marker(info.status),
            progress_marker(info.progress),
            url,
            info.ref_count,
            info.labels
        )
    };
    line.trim_end().to_string()
}

fn skipped_line(item: &SkippedItem) -> String {
    match item {
        SkippedItem::Commit(sha) => format!("pull requests of commit {}", sha),
        SkippedItem::PullRequest(number) => format!("pull request #{}", number),
        SkippedItem::Issue(number) => format!("issue #{}", number),
        SkippedItem::Parent(number) => format!("parent of issue #{}", number),
    }
}

fn write_section<W: WriteColor>(
    out: &mut W,
    heading: &str,
    color: Color,
    lines: &[String],
) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    write_colored(out, heading, Some(color), false)?;
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)
}

/// Renders the outcome of `check`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_check<W: WriteColor>(
    out: &mut W,
    response: &CheckResponse,
    links: &WebLinks,
) -> io::Result<()> {
    match &response.outcome {
        CheckOutcome::NothingToRelease { tag, branch } => {
            writeln!(out, "{}", nothing_to_release_message(tag, branch))
        }
        CheckOutcome::Report(report) => render_report(out, &response.repo, report, links),
    }
}

fn render_report<W: WriteColor>(
    out: &mut W,
    repo: &str,
    report: &CheckReport,
    links: &WebLinks,
) -> io::Result<()> {
    let summary = &report.summary;
    writeln!(out, "Checking PRs and issues since {}...", report.since)?;
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "--------")?;

    let unlinked: Vec<String> = summary
        .unlinked_prs
        .iter()
        .map(|number| links.pull_request(repo, *number))
        .collect();
    write_section(out, "PRs without linked issues:", Color::Yellow, &unlinked)?;

    let translation: Vec<String> = summary
        .translation_prs
        .iter()
        .map(|number| links.pull_request(repo, *number))
        .collect();
    write_section(out, "Translation PRs:", Color::Cyan, &translation)?;

    let orphans: Vec<String> = summary
        .orphan_commits
        .iter()
        .map(|sha| links.commit(repo, sha))
        .collect();
    write_section(out, "Commits outside PRs:", Color::Magenta, &orphans)?;

    write_colored(out, "Issues:", None, true)?;
    writeln!(out)?;
    for entry in summary.display_order() {
        if let Some(info) = summary.issues.get(&entry.number) {
            let url = links.issue(&summary.issues_repo, info.number);
            writeln!(out, "{}", issue_line(info, &url, entry.depth))?;
        }
    }

    if !summary.skipped.is_empty() {
        writeln!(out)?;
        let skipped: Vec<String> = summary.skipped.iter().map(skipped_line).collect();
        write_section(out, "Skipped lookups:", Color::Red, &skipped)?;
    }

    if report.ready {
        writeln!(out)?;
        write_colored(out, "✅ All checks passed! Ready to release.", Some(Color::Green), false)?;
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out, "Issue status:    {} Open    {} Closed", OPEN_ISSUE, CLOSED_ISSUE)?;
    writeln!(
        out,
        "Progress status: {} In Progress    {} Testing    {} Verified",
        IN_PROGRESS, TESTING, VERIFIED
    )
}

/// Renders the outcome of `create`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_create<W: WriteColor>(out: &mut W, outcome: &CreateOutcome) -> io::Result<()> {
    let kind = match (outcome.draft, outcome.prerelease) {
        (true, _) => "Draft release",
        (false, true) => "Pre-release",
        (false, false) => "Release",
    };
    write_colored(
        out,
        &format!("✅ {} {} created successfully", kind, outcome.tag),
        Some(Color::Green),
        false,
    )?;
    writeln!(out)?;
    writeln!(out, "   {}", outcome.url)?;
    if let Some(previous) = &outcome.previous_release {
        writeln!(out, "   Changes since {}", previous)?;
    }
    if let Some(notes) = &outcome.notes {
        writeln!(out)?;
        writeln!(out, "{}", notes.trim_end())?;
    }
    Ok(())
}

/// Renders the outcome of `comment`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_comment<W: WriteColor>(
    out: &mut W,
    outcome: &CommentOutcome,
    issues_repo: &str,
) -> io::Result<()> {
    if outcome.linked_issues.is_empty() {
        return writeln!(out, "No linked issues found for this release.");
    }

    for comment in &outcome.comments {
        let line = match comment.parent_of {
            Some(child) => format!(
                "✅ Commented on parent issue {}#{} (parent of #{})",
                issues_repo, comment.number, child
            ),
            None => format!("✅ Commented on issue {}#{}", issues_repo, comment.number),
        };
        writeln!(out, "{}", line)?;
        writeln!(out, "   {}", comment.url)?;
    }
    for failure in &outcome.failures {
        write_colored(
            out,
            &format!("❌ Failed to comment on issue {}#{}: {}", issues_repo, failure.number, failure.message),
            Some(Color::Red),
            false,
        )?;
        writeln!(out)?;
    }
    if !outcome.skipped.is_empty() {
        let skipped: Vec<String> = outcome.skipped.iter().map(skipped_line).collect();
        writeln!(out)?;
        write_section(out, "Skipped lookups:", Color::Red, &skipped)?;
    }

    if outcome.comments.is_empty() {
        writeln!(out, "No open issues to comment on.")
    } else {
        writeln!(out)?;
        write_colored(
            out,
            &format!("✅ Posted {} comment(s) successfully", outcome.comments.len()),
            Some(Color::Green),
            false,
        )?;
        writeln!(out)
    }
}

/// Renders the outcome of `clean` as a table of pre-releases.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn render_clean<W: WriteColor>(out: &mut W, outcome: &CleanOutcome) -> io::Result<()> {
    if outcome.prereleases.is_empty() {
        return writeln!(
            out,
            "No pre-releases found between {} and {}",
            outcome.previous, outcome.stable
        );
    }

    let verb = if outcome.dry_run { "would be deleted" } else { "to delete" };
    writeln!(
        out,
        "Found {} pre-release(s) {} between {} and {}:",
        outcome.prereleases.len(),
        verb,
        outcome.previous,
        outcome.stable
    )?;

    let mut builder = Builder::default();
    builder.push_record(["Tag", "Result"]);
    for tag in &outcome.prereleases {
        let result = if outcome.dry_run {
            "dry run".to_string()
        } else if outcome.deleted.contains(tag) {
            "deleted".to_string()
        } else {
            outcome
                .failures
                .iter()
                .find(|failure| &failure.tag == tag)
                .map_or_else(|| "not deleted".to_string(), |failure| format!("failed: {}", failure.message))
        };
        builder.push_record([tag.clone(), result]);
    }
    let mut table = builder.build();
    table.with(Style::modern());
    writeln!(out, "{}", table)?;

    if !outcome.dry_run {
        writeln!(out)?;
        let color = if outcome.failures.is_empty() {
            Color::Green
        } else {
            Color::Yellow
        };
        write_colored(
            out,
            &format!("✅ Deleted {} pre-release(s) successfully", outcome.deleted.len()),
            Some(color),
            false,
        )?;
        writeln!(out)?;
    }
    Ok(())
}
