// Rust guideline compliant 2026-10-14

//! Linkage scanning.
//!
//! Maps the commits of a range to their pull requests and extracts issue
//! references from pull request bodies.

use crate::hosting::HostingApi;
use crate::links::DEFAULT_WEB_HOST;
use crate::models::PullRequest;
use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

/// Label marking a pull request as a translation update.
pub const TRANSLATION_LABEL: &str = "translation";

/// Result of scanning a commit range.
///
/// `commits_in_prs` and `orphan_commits` partition `commits` exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Commits of the range, oldest first.
    pub commits: Vec<String>,
    /// Unique pull requests associated with any commit of the range.
    pub pull_requests: BTreeSet<u64>,
    /// Commits associated with at least one pull request.
    pub commits_in_prs: Vec<String>,
    /// Commits with no associated pull request, including failed lookups.
    pub orphan_commits: Vec<String>,
    /// Commits whose pull request lookup failed.
    pub skipped_commits: Vec<String>,
}

/// Scans a commit range, classifying every commit as in-PR or orphan.
///
/// A commit whose pull request lookup fails contributes no pull request, is
/// counted as orphan and is listed in `skipped_commits`.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `repo` - Repository identifier
/// * `start` - Range start ref (exclusive)
/// * `end` - Range end ref (inclusive)
///
/// # Errors
///
/// Returns [`Error::EmptyRange`] if the range has no commits, or
/// [`Error::Transport`] if the range itself cannot be fetched.
pub fn scan_commits(
    host: &dyn HostingApi,
    repo: &str,
    start: &str,
    end: &str,
) -> Result<ScanOutcome> {
    let commits = host
        .commit_range(repo, start, end)
        .map_err(|source| Error::transport("compare commits", source))?;

    if commits.is_empty() {
        return Err(Error::EmptyRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    tracing::debug!("Scanning {} commits between {} and {}", commits.len(), start, end);

    let mut outcome = ScanOutcome::default();
    for sha in &commits {
        match host.pull_requests_for_commit(repo, sha) {
            Ok(numbers) if !numbers.is_empty() => {
                outcome.pull_requests.extend(numbers);
                outcome.commits_in_prs.push(sha.clone());
            }
            Ok(_) => outcome.orphan_commits.push(sha.clone()),
            Err(err) => {
                tracing::warn!("Skipping pull request lookup for commit {}: {}", sha, err);
                outcome.skipped_commits.push(sha.clone());
                outcome.orphan_commits.push(sha.clone());
            }
        }
    }
    outcome.commits = commits;

    Ok(outcome)
}

/// Scans a commit range for pull requests.
///
/// Same as [`scan_commits`], but at least one pull request must be found.
///
/// # Errors
///
/// Returns [`Error::NoPullRequests`] when no commit maps to a pull request,
/// in addition to the errors of [`scan_commits`].
pub fn scan_pull_requests(
    host: &dyn HostingApi,
    repo: &str,
    start: &str,
    end: &str,
) -> Result<ScanOutcome> {
    let outcome = scan_commits(host, repo, start, end)?;
    if outcome.pull_requests.is_empty() {
        return Err(Error::NoPullRequests {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(outcome)
}

/// Extracts issue numbers referenced in a pull request body.
///
/// Uses the default web host for the URL form. See [`extract_linked_issues_on`].
#[must_use]
pub fn extract_linked_issues(body: &str, issues_repo: &str) -> Vec<u64> {
    extract_linked_issues_on(body, issues_repo, DEFAULT_WEB_HOST)
}

/// Extracts issue numbers referenced in a pull request body.
///
/// Three forms are recognized, case-sensitively on owner and name:
/// - `<owner>/issues/<N>`
/// - `<owner>/<name>#<N>`
/// - `https://<host>/<owner>/<name>/issues/<N>`
///
/// Matches of all forms are concatenated form by form; duplicates are kept.
///
/// # Arguments
///
/// * `body` - Pull request body
/// * `issues_repo` - Issues repository (`owner/name`)
/// * `host` - Web host of the URL form
///
/// # Returns
///
/// Issue numbers in match order, or an empty list when `issues_repo` is not
/// exactly `owner/name`.
#[must_use]
pub fn extract_linked_issues_on(body: &str, issues_repo: &str, host: &str) -> Vec<u64> {
    let parts: Vec<&str> = issues_repo.split('/').collect();
    let [owner, name] = parts.as_slice() else {
        return Vec::new();
    };
    let owner = regex::escape(owner);
    let name = regex::escape(name);
    let host = regex::escape(host);

    let patterns = [
        format!(r"{}/issues/(\d+)", owner),
        format!(r"{}/{}#(\d+)", owner, name),
        format!(r"https://{}/{}/{}/issues/(\d+)", host, owner, name),
    ];

    let mut numbers = Vec::new();
    for pattern in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        numbers.extend(
            re.captures_iter(body)
                .filter_map(|caps| caps[1].parse::<u64>().ok())
                .filter(|number| *number > 0),
        );
    }
    numbers
}

/// Classification of a pull request by its issue linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", content = "issues", rename_all = "snake_case")]
pub enum PullRequestClass {
    /// References at least one issue.
    Linked(Vec<u64>),
    /// No linked issue, carries the translation label.
    Translation,
    /// Neither.
    Unlinked,
}

/// Classifies a pull request as linked, translation or unlinked.
///
/// # Arguments
///
/// * `pr` - Pull request snapshot
/// * `issues_repo` - Issues repository the references must point to
/// * `host` - Web host of the URL form
#[must_use]
pub fn classify_pull_request(pr: &PullRequest, issues_repo: &str, host: &str) -> PullRequestClass {
    let linked = extract_linked_issues_on(&pr.body, issues_repo, host);
    if !linked.is_empty() {
        PullRequestClass::Linked(linked)
    } else if pr.has_label(TRANSLATION_LABEL) {
        PullRequestClass::Translation
    } else {
        PullRequestClass::Unlinked
    }
}
