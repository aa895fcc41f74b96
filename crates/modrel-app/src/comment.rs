// Rust guideline compliant 2026-10-17

//! Release announcement workflow.
//!
//! Posts a comment announcing a release on every open issue linked by the
//! pull requests of the release, and on the open parent of each such issue.

use crate::error::Result;
use crate::options::{non_empty, CommentOptions, ModuleOptions};
use modrel_core::{
    extract_linked_issues_on, find_previous_release, scan_pull_requests, Error as CoreError,
    HostingApi, Release, SkippedItem, WebLinks,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// A comment that was posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostedComment {
    /// Issue number.
    pub number: u64,
    /// Comment URL.
    pub url: String,
    /// Linked issue this issue is the parent of, when commented as a parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_of: Option<u64>,
}

/// A comment that could not be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentFailure {
    /// Issue number.
    pub number: u64,
    /// Failure message.
    pub message: String,
}

/// Result of the `comment` workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentOutcome {
    /// Module repository.
    pub repo: String,
    /// Announced release.
    pub release: String,
    /// Whether the announced release is a pre-release.
    pub prerelease: bool,
    /// Release the announced changes start from.
    pub previous_release: String,
    /// Issues linked by the pull requests of the release.
    pub linked_issues: Vec<u64>,
    /// Comment body.
    pub body: String,
    /// Posted comments in posting order.
    pub comments: Vec<PostedComment>,
    /// Linked issues left alone because they are closed.
    pub closed: Vec<u64>,
    /// Comments that failed.
    pub failures: Vec<CommentFailure>,
    /// Lookups skipped because they failed.
    pub skipped: Vec<SkippedItem>,
}

/// Builds the announcement body of a release.
#[must_use]
pub fn comment_body(links: &WebLinks, repo: &str, tag: &str, prerelease: bool) -> String {
    let kind = if prerelease { "Testing release" } else { "Release" };
    format!("{} `{}` [{}]({})", kind, repo, tag, links.release(repo, tag))
}

/// Announces a release on its linked issues.
///
/// Each issue is commented at most once per run, whether reached as a linked
/// issue or as a parent. Per-issue failures are collected, not fatal.
///
/// # Errors
///
/// Returns an error if:
/// - The repository cannot be resolved
/// - The release is not listed, or the repository has no release
/// - No previous release exists
/// - The range between the releases cannot be scanned
pub fn comment_release(
    host: &dyn HostingApi,
    module: &ModuleOptions,
    options: &CommentOptions,
) -> Result<CommentOutcome> {
    let repo = module.resolve_repository(host)?;
    let repo_id = repo.id();
    let issues_repo = module.issues_repo.as_str();

    let history = host
        .list_releases(&repo_id, module.release_list_limit, false)
        .map_err(|source| CoreError::transport("list releases", source))?;
    let release: Release = match non_empty(options.release.as_deref()) {
        Some(tag) => history
            .into_iter()
            .find(|release| release.tag == tag)
            .ok_or_else(|| CoreError::ReleaseNotFound(tag.to_string()))?,
        None => history
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NoRelease(repo_id.clone()))?,
    };

    let previous = find_previous_release(host, &repo_id, &release.tag, module.release_list_limit)?;
    let scan = scan_pull_requests(host, &repo_id, &previous.tag, &release.tag)?;

    let links = module.links();
    let mut skipped: Vec<SkippedItem> = scan
        .skipped_commits
        .iter()
        .cloned()
        .map(SkippedItem::Commit)
        .collect();
    let mut linked: BTreeSet<u64> = BTreeSet::new();
    for number in &scan.pull_requests {
        match host.pull_request(&repo_id, *number) {
            Ok(pr) => linked.extend(extract_linked_issues_on(&pr.body, issues_repo, links.host())),
            Err(err) => {
                tracing::warn!("Skipping pull request {}: {}", number, err);
                skipped.push(SkippedItem::PullRequest(*number));
            }
        }
    }

    let body = comment_body(&links, &repo_id, &release.tag, release.is_prerelease);
    let mut outcome = CommentOutcome {
        repo: repo_id,
        release: release.tag,
        prerelease: release.is_prerelease,
        previous_release: previous.tag,
        linked_issues: linked.iter().copied().collect(),
        body,
        comments: Vec::new(),
        closed: Vec::new(),
        failures: Vec::new(),
        skipped,
    };

    let mut commented: BTreeSet<u64> = BTreeSet::new();
    for number in linked {
        if commented.contains(&number) {
            continue;
        }

        match host.issue(issues_repo, number) {
            Ok(issue) if issue.is_closed() => {
                outcome.closed.push(number);
                continue;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("Skipping issue {}: {}", number, err);
                outcome.skipped.push(SkippedItem::Issue(number));
                continue;
            }
        }

        if !post(host, issues_repo, number, None, &mut outcome) {
            continue;
        }
        commented.insert(number);

        let parent = match host.parent_issue(issues_repo, number) {
            Ok(parent) => parent.filter(|parent| *parent > 0),
            Err(err) => {
                tracing::warn!("Skipping parent lookup of issue {}: {}", number, err);
                outcome.skipped.push(SkippedItem::Parent(number));
                None
            }
        };
        let Some(parent) = parent else {
            continue;
        };
        if commented.contains(&parent) {
            continue;
        }

        match host.issue(issues_repo, parent) {
            Ok(issue) if issue.is_closed() => {}
            Ok(_) => {
                if post(host, issues_repo, parent, Some(number), &mut outcome) {
                    commented.insert(parent);
                }
            }
            Err(err) => {
                tracing::warn!("Skipping parent issue {}: {}", parent, err);
                outcome.skipped.push(SkippedItem::Issue(parent));
            }
        }
    }

    Ok(outcome)
}

/// Posts the announcement on one issue, recording success or failure.
fn post(
    host: &dyn HostingApi,
    issues_repo: &str,
    number: u64,
    parent_of: Option<u64>,
    outcome: &mut CommentOutcome,
) -> bool {
    match host.create_issue_comment(issues_repo, number, &outcome.body) {
        Ok(url) => {
            tracing::info!("Commented on issue {}#{}", issues_repo, number);
            outcome.comments.push(PostedComment {
                number,
                url,
                parent_of,
            });
            true
        }
        Err(err) => {
            tracing::warn!("Failed to comment on issue {}: {}", number, err);
            outcome.failures.push(CommentFailure {
                number,
                message: err.to_string(),
            });
            false
        }
    }
}
