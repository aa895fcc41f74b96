// Rust guideline compliant 2026-10-15

//! Readiness aggregation.
//!
//! Builds the release-readiness report of a module: pull requests without
//! linked issues, translation pull requests, commits outside pull requests,
//! and the forest of linked issues with their progress tier.
//!
//! Per-item lookup failures never abort a check; the item is skipped and
//! recorded in [`CheckSummary::skipped`].

use crate::hosting::HostingApi;
use crate::linkage::{classify_pull_request, scan_pull_requests, PullRequestClass};
use crate::links::WebLinks;
use crate::models::{GitRef, Issue, Repository};
use crate::releases::latest_release;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Label marking an issue as verified.
pub const VERIFIED_LABEL: &str = "verified";
/// Label marking an issue as under testing.
pub const TESTING_LABEL: &str = "testing";

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Open issue.
    Open,
    /// Closed issue.
    Closed,
}

/// Progress tier derived from issue labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    /// Neither testing nor verified.
    InProgress,
    /// Labelled `testing`.
    Testing,
    /// Labelled `verified`.
    Verified,
}

impl ProgressTier {
    /// Derives the tier from a label set; `verified` takes precedence over `testing`.
    #[must_use]
    pub fn from_labels(labels: &[String]) -> Self {
        if labels.iter().any(|label| label == VERIFIED_LABEL) {
            ProgressTier::Verified
        } else if labels.iter().any(|label| label == TESTING_LABEL) {
            ProgressTier::Testing
        } else {
            ProgressTier::InProgress
        }
    }
}

/// Aggregated information about one linked issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueInfo {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Open/closed state.
    pub status: IssueStatus,
    /// Progress tier.
    pub progress: ProgressTier,
    /// Space-joined labels, without the progress labels.
    pub labels: String,
    /// How many times the issue was referenced during the run.
    pub ref_count: usize,
    /// Parent issue, if any.
    pub parent: Option<u64>,
    /// Child issues in discovery order.
    pub children: Vec<u64>,
}

impl IssueInfo {
    fn from_issue(issue: &Issue, parent: Option<u64>) -> Self {
        let status = if issue.is_closed() {
            IssueStatus::Closed
        } else {
            IssueStatus::Open
        };
        let labels = issue
            .labels
            .iter()
            .filter(|label| *label != VERIFIED_LABEL && *label != TESTING_LABEL)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            number: issue.number,
            title: issue.title.clone(),
            status,
            progress: ProgressTier::from_labels(&issue.labels),
            labels,
            ref_count: 1,
            parent,
            children: Vec::new(),
        }
    }
}

/// A lookup that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SkippedItem {
    /// Pull request lookup for a commit.
    Commit(String),
    /// Pull request fetch.
    PullRequest(u64),
    /// Issue fetch.
    Issue(u64),
    /// Parent lookup of an issue.
    Parent(u64),
}

/// One line of the issue forest display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEntry {
    /// Issue number.
    pub number: u64,
    /// Nesting depth (0 for top level).
    pub depth: usize,
}

/// Summary of one readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Issues repository the linked issues live in.
    pub issues_repo: String,
    /// Pull requests without linked issues.
    pub unlinked_prs: Vec<u64>,
    /// Translation pull requests.
    pub translation_prs: Vec<u64>,
    /// Commits outside any pull request.
    pub orphan_commits: Vec<String>,
    /// Linked issues and their ancestors, by number.
    pub issues: BTreeMap<u64, IssueInfo>,
    /// Lookups skipped because they failed.
    pub skipped: Vec<SkippedItem>,
}

impl CheckSummary {
    /// Creates an empty summary for the given issues repository.
    pub fn new(issues_repo: impl Into<String>) -> Self {
        Self {
            issues_repo: issues_repo.into(),
            unlinked_prs: Vec::new(),
            translation_prs: Vec::new(),
            orphan_commits: Vec::new(),
            issues: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Adds a linked issue to the summary.
    ///
    /// An issue already present only has its reference count incremented.
    /// Otherwise the issue is fetched, then its parent chain is ascended until
    /// an issue without parent, an issue already in the summary, or a revisit
    /// (cycle) is reached. Each discovered issue is linked into its parent's
    /// child list.
    ///
    /// Failed lookups are recorded in [`CheckSummary::skipped`]: an issue that
    /// cannot be fetched is left out, and its child (if any) is kept without parent.
    pub fn process_issue(&mut self, host: &dyn HostingApi, number: u64) {
        if let Some(info) = self.issues.get_mut(&number) {
            info.ref_count += 1;
            return;
        }

        // Fetched issues from the referenced one up to the top of the chain.
        let mut chain: Vec<IssueInfo> = Vec::new();
        let mut visited: HashSet<u64> = HashSet::new();
        let mut current = number;

        loop {
            visited.insert(current);

            let issue = match host.issue(&self.issues_repo, current) {
                Ok(issue) => issue,
                Err(err) => {
                    tracing::warn!("Skipping issue {}: {}", current, err);
                    self.skipped.push(SkippedItem::Issue(current));
                    if let Some(child) = chain.last_mut() {
                        child.parent = None;
                    }
                    break;
                }
            };

            let parent = match host.parent_issue(&self.issues_repo, current) {
                Ok(parent) => parent.filter(|parent| *parent > 0),
                Err(err) => {
                    tracing::warn!("Skipping parent lookup of issue {}: {}", current, err);
                    self.skipped.push(SkippedItem::Parent(current));
                    None
                }
            };

            let mut info = IssueInfo::from_issue(&issue, parent);
            match parent {
                Some(parent) if self.issues.contains_key(&parent) => {
                    chain.push(info);
                    break;
                }
                Some(parent) if visited.contains(&parent) => {
                    tracing::warn!("Parent cycle detected at issue {}", current);
                    info.parent = None;
                    chain.push(info);
                    break;
                }
                Some(parent) => {
                    chain.push(info);
                    current = parent;
                }
                None => {
                    chain.push(info);
                    break;
                }
            }
        }

        // Insert top-down so parents exist before their children are attached.
        for info in chain.into_iter().rev() {
            let number = info.number;
            if let Some(parent) = info.parent.and_then(|parent| self.issues.get_mut(&parent)) {
                parent.children.push(number);
            }
            self.issues.insert(number, info);
        }
    }

    /// Returns the readiness verdict.
    ///
    /// Ready when no pull request lacks a linked issue, every issue with
    /// children has only verified children, and every issue without children
    /// is itself verified.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        if !self.unlinked_prs.is_empty() {
            return false;
        }

        self.issues.values().all(|info| {
            if info.children.is_empty() {
                info.progress == ProgressTier::Verified
            } else {
                info.children.iter().all(|child| {
                    self.issues
                        .get(child)
                        .is_some_and(|child| child.progress == ProgressTier::Verified)
                })
            }
        })
    }

    /// Returns the issues to display, in display order.
    ///
    /// Top-level issues with children come first, each followed by its
    /// direct children; standalone issues follow. Only one level of nesting
    /// is rendered.
    #[must_use]
    pub fn display_order(&self) -> Vec<DisplayEntry> {
        let roots = self
            .issues
            .values()
            .filter(|info| info.parent.is_none() && !info.children.is_empty());
        let standalone = self
            .issues
            .values()
            .filter(|info| info.parent.is_none() && info.children.is_empty());

        let mut entries = Vec::new();
        for root in roots {
            entries.push(DisplayEntry {
                number: root.number,
                depth: 0,
            });
            entries.extend(
                root.children
                    .iter()
                    .filter(|child| self.issues.contains_key(child))
                    .map(|child| DisplayEntry {
                        number: *child,
                        depth: 1,
                    }),
            );
        }
        entries.extend(standalone.map(|info| DisplayEntry {
            number: info.number,
            depth: 0,
        }));
        entries
    }
}

/// Readiness report of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Latest stable release the check starts from.
    pub since: String,
    /// Aggregated linkage.
    pub summary: CheckSummary,
    /// Readiness verdict.
    pub ready: bool,
}

/// Outcome of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The latest stable release already points at the default branch head.
    NothingToRelease {
        /// Latest stable tag.
        tag: String,
        /// Default branch name.
        branch: String,
    },
    /// Changes exist since the latest stable release.
    Report(CheckReport),
}

/// Checks whether a module is ready to be released.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `repo` - Resolved module repository
/// * `issues_repo` - Issues repository linked issues must belong to
/// * `links` - Web host used for issue URL matching
///
/// # Returns
///
/// [`CheckOutcome::NothingToRelease`] when the latest stable tag is the branch
/// head, otherwise the full report.
///
/// # Errors
///
/// Returns an error if:
/// - The repository has no stable release ([`Error::NoRelease`])
/// - The range has no commits ([`Error::EmptyRange`])
/// - No pull request is found in the range ([`Error::NoPullRequests`])
/// - A ref or range lookup fails ([`Error::Transport`])
pub fn check_readiness(
    host: &dyn HostingApi,
    repo: &Repository,
    issues_repo: &str,
    links: &WebLinks,
) -> Result<CheckOutcome> {
    let repo_id = repo.id();
    let latest = latest_release(host, &repo_id, true)?;
    tracing::debug!("Checking pull requests and issues since {}", latest.tag);

    let tag_sha = host
        .ref_sha(&repo_id, &GitRef::Tag(latest.tag.clone()))
        .map_err(|source| {
            Error::transport(format!("get commit SHA for tag {}", latest.tag), source)
        })?;
    let branch_sha = host
        .ref_sha(&repo_id, &GitRef::Branch(repo.default_branch.clone()))
        .map_err(|source| {
            Error::transport(format!("get {} branch SHA", repo.default_branch), source)
        })?;

    if tag_sha == branch_sha {
        return Ok(CheckOutcome::NothingToRelease {
            tag: latest.tag,
            branch: repo.default_branch.clone(),
        });
    }

    let scan = scan_pull_requests(host, &repo_id, &latest.tag, &repo.default_branch)?;

    let mut summary = CheckSummary::new(issues_repo);
    summary
        .skipped
        .extend(scan.skipped_commits.iter().cloned().map(SkippedItem::Commit));

    for number in &scan.pull_requests {
        let pr = match host.pull_request(&repo_id, *number) {
            Ok(pr) => pr,
            Err(err) => {
                tracing::warn!("Skipping pull request {}: {}", number, err);
                summary.skipped.push(SkippedItem::PullRequest(*number));
                continue;
            }
        };

        match classify_pull_request(&pr, issues_repo, links.host()) {
            PullRequestClass::Linked(issues) => {
                for issue in issues {
                    summary.process_issue(host, issue);
                }
            }
            PullRequestClass::Translation => summary.translation_prs.push(pr.number),
            PullRequestClass::Unlinked => summary.unlinked_prs.push(pr.number),
        }
    }

    summary.orphan_commits = scan.orphan_commits;
    let ready = summary.is_ready();

    Ok(CheckOutcome::Report(CheckReport {
        since: latest.tag,
        summary,
        ready,
    }))
}
