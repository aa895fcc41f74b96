// Rust guideline compliant 2026-10-14

//! In-memory hosting platform.
//!
//! [`FixtureHost`] serves a [`HostFixture`] snapshot through the
//! [`HostingApi`] port. Every repository has a linear default-branch history
//! (oldest first); commits that live off that history are listed as side
//! commits together with the branch commit they forked from. Mutations
//! (release creation and deletion, issue comments) are applied to the
//! snapshot and appended to a log so callers can assert on side effects.
//!
//! Lookups listed in the `failing_*` sets return a [`HostError`], which lets
//! tests exercise the skip-and-continue paths of the engine.

use crate::error::{HostError, HostResult};
use crate::hosting::HostingApi;
use crate::links::WebLinks;
use crate::models::{GitRef, Issue, NewRelease, PullRequest, Release, Repository};
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Snapshot of the hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostFixture {
    /// Repository reported as the ambient working-directory context.
    #[serde(default)]
    pub current_repository: Option<String>,
    /// Repositories keyed by `owner/name`.
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryFixture>,
}

impl HostFixture {
    /// Adds (or replaces) a repository.
    #[must_use]
    pub fn with_repository(mut self, id: impl Into<String>, repo: RepositoryFixture) -> Self {
        self.repositories.insert(id.into(), repo);
        self
    }

    /// Sets the ambient repository.
    #[must_use]
    pub fn with_current_repository(mut self, id: impl Into<String>) -> Self {
        self.current_repository = Some(id.into());
        self
    }
}

/// An issue as stored in the fixture, including its parent link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFixture {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    #[serde(default)]
    pub title: String,
    /// Literal platform state.
    #[serde(default = "default_issue_state")]
    pub state: String,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Parent issue number for sub-issues.
    #[serde(default)]
    pub parent: Option<u64>,
}

fn default_issue_state() -> String {
    "open".to_string()
}

impl IssueFixture {
    /// Creates an open issue without labels or parent.
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            state: default_issue_state(),
            labels: Vec::new(),
            parent: None,
        }
    }

    /// Sets the platform state.
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Sets the parent issue.
    #[must_use]
    pub fn parent(mut self, parent: u64) -> Self {
        self.parent = Some(parent);
        self
    }

    fn to_issue(&self) -> Issue {
        Issue {
            number: self.number,
            title: self.title.clone(),
            state: self.state.clone(),
            labels: self.labels.clone(),
        }
    }
}

/// One repository of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFixture {
    /// Default branch name.
    #[serde(default = "default_branch_name")]
    pub default_branch: String,
    /// Default-branch history, oldest first; the last entry is the branch tip.
    #[serde(default)]
    pub commits: Vec<String>,
    /// Commits outside the default branch, mapped to their fork point.
    #[serde(default)]
    pub side_commits: BTreeMap<String, String>,
    /// Tag name to commit.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Extra branch heads; the default branch head is the history tip unless listed here.
    #[serde(default)]
    pub branches: BTreeMap<String, String>,
    /// Commit to associated pull request numbers.
    #[serde(default)]
    pub pulls_by_commit: BTreeMap<String, Vec<u64>>,
    /// Pull requests.
    #[serde(default)]
    pub pull_requests: Vec<PullRequest>,
    /// Issues.
    #[serde(default)]
    pub issues: Vec<IssueFixture>,
    /// Releases in any order.
    #[serde(default)]
    pub releases: Vec<Release>,
    /// Commits whose pull request lookup fails.
    #[serde(default)]
    pub failing_commits: BTreeSet<String>,
    /// Pull requests whose fetch fails.
    #[serde(default)]
    pub failing_pulls: BTreeSet<u64>,
    /// Issues whose fetch fails.
    #[serde(default)]
    pub failing_issues: BTreeSet<u64>,
    /// Issues whose parent lookup fails.
    #[serde(default)]
    pub failing_parents: BTreeSet<u64>,
    /// Issues on which posting a comment fails.
    #[serde(default)]
    pub failing_comments: BTreeSet<u64>,
    /// Release tags whose deletion fails.
    #[serde(default)]
    pub failing_deletions: BTreeSet<String>,
}

fn default_branch_name() -> String {
    "main".to_string()
}

impl Default for RepositoryFixture {
    fn default() -> Self {
        Self::new(default_branch_name())
    }
}

impl RepositoryFixture {
    /// Creates an empty repository with the given default branch.
    pub fn new(default_branch: impl Into<String>) -> Self {
        Self {
            default_branch: default_branch.into(),
            commits: Vec::new(),
            side_commits: BTreeMap::new(),
            tags: BTreeMap::new(),
            branches: BTreeMap::new(),
            pulls_by_commit: BTreeMap::new(),
            pull_requests: Vec::new(),
            issues: Vec::new(),
            releases: Vec::new(),
            failing_commits: BTreeSet::new(),
            failing_pulls: BTreeSet::new(),
            failing_issues: BTreeSet::new(),
            failing_parents: BTreeSet::new(),
            failing_comments: BTreeSet::new(),
            failing_deletions: BTreeSet::new(),
        }
    }

    /// Appends commits to the default-branch history.
    #[must_use]
    pub fn commits<I, S>(mut self, shas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commits.extend(shas.into_iter().map(Into::into));
        self
    }

    /// Tags a commit.
    #[must_use]
    pub fn tag(mut self, name: impl Into<String>, sha: impl Into<String>) -> Self {
        self.tags.insert(name.into(), sha.into());
        self
    }

    /// Associates a commit with pull requests.
    #[must_use]
    pub fn pulls(mut self, sha: impl Into<String>, numbers: &[u64]) -> Self {
        self.pulls_by_commit
            .entry(sha.into())
            .or_default()
            .extend_from_slice(numbers);
        self
    }

    /// Adds a pull request.
    #[must_use]
    pub fn pull_request(mut self, number: u64, body: impl Into<String>, labels: &[&str]) -> Self {
        self.pull_requests.push(PullRequest {
            number,
            body: body.into(),
            labels: labels.iter().map(|label| (*label).to_string()).collect(),
        });
        self
    }

    /// Adds an issue.
    #[must_use]
    pub fn issue(mut self, issue: IssueFixture) -> Self {
        self.issues.push(issue);
        self
    }

    /// Adds a release.
    #[must_use]
    pub fn release(mut self, tag: impl Into<String>, is_prerelease: bool, created_at: DateTime<Utc>) -> Self {
        self.releases.push(Release {
            tag: tag.into(),
            is_prerelease,
            created_at,
        });
        self
    }

    fn tip(&self) -> Option<&str> {
        self.branches
            .get(&self.default_branch)
            .map(String::as_str)
            .or_else(|| self.commits.last().map(String::as_str))
    }

    fn is_known_commit(&self, sha: &str) -> bool {
        self.commits.iter().any(|commit| commit == sha) || self.side_commits.contains_key(sha)
    }

    /// Resolves a tag, branch or raw commit SHA to a commit.
    fn resolve(&self, name: &str) -> Option<String> {
        if let Some(sha) = self.tags.get(name) {
            return Some(sha.clone());
        }
        if let Some(sha) = self.branches.get(name) {
            return Some(sha.clone());
        }
        if name == self.default_branch {
            return self.tip().map(str::to_string);
        }
        self.is_known_commit(name).then(|| name.to_string())
    }

    /// Position on the default-branch history; side commits map to their fork point.
    fn history_position(&self, sha: &str) -> Option<usize> {
        let anchor = self.side_commits.get(sha).map_or(sha, String::as_str);
        self.commits.iter().position(|commit| commit == anchor)
    }

    fn find_issue(&self, number: u64) -> Option<&IssueFixture> {
        self.issues.iter().find(|issue| issue.number == number)
    }
}

/// A side effect applied by [`FixtureHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMutation {
    /// A release was created.
    ReleaseCreated {
        /// Repository identifier.
        repo: String,
        /// Release parameters as requested.
        release: NewRelease,
    },
    /// A release was deleted.
    ReleaseDeleted {
        /// Repository identifier.
        repo: String,
        /// Deleted tag.
        tag: String,
    },
    /// An issue comment was posted.
    CommentPosted {
        /// Repository identifier.
        repo: String,
        /// Issue number.
        number: u64,
        /// Comment body.
        body: String,
    },
}

/// [`HostingApi`] implementation over an in-memory snapshot.
#[derive(Debug, Default)]
pub struct FixtureHost {
    state: RefCell<HostFixture>,
    mutations: RefCell<Vec<HostMutation>>,
    links: WebLinks,
}

impl FixtureHost {
    /// Creates a host serving the given snapshot.
    #[must_use]
    pub fn new(fixture: HostFixture) -> Self {
        Self {
            state: RefCell::new(fixture),
            mutations: RefCell::new(Vec::new()),
            links: WebLinks::default(),
        }
    }

    /// Sets the web host used for the URLs of posted comments.
    #[must_use]
    pub fn with_links(mut self, links: WebLinks) -> Self {
        self.links = links;
        self
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a [`HostFixture`].
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: HostFixture = serde_json::from_str(json)?;
        Ok(Self::new(fixture))
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Returns the mutations applied so far, in order.
    #[must_use]
    pub fn mutations(&self) -> Vec<HostMutation> {
        self.mutations.borrow().clone()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> HostFixture {
        self.state.borrow().clone()
    }

    fn with_repo<T>(
        &self,
        id: &str,
        f: impl FnOnce(&RepositoryFixture) -> HostResult<T>,
    ) -> HostResult<T> {
        let state = self.state.borrow();
        let repo = state
            .repositories
            .get(id)
            .ok_or_else(|| HostError::new(format!("HTTP 404: Not Found (repos/{})", id)))?;
        f(repo)
    }

    fn with_repo_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut RepositoryFixture) -> HostResult<T>,
    ) -> HostResult<T> {
        let mut state = self.state.borrow_mut();
        let repo = state
            .repositories
            .get_mut(id)
            .ok_or_else(|| HostError::new(format!("HTTP 404: Not Found (repos/{})", id)))?;
        f(repo)
    }

    fn record(&self, mutation: HostMutation) {
        self.mutations.borrow_mut().push(mutation);
    }
}

impl HostingApi for FixtureHost {
    fn repository(&self, id: &str) -> HostResult<Repository> {
        self.with_repo(id, |repo| {
            let (owner, name) = id
                .split_once('/')
                .ok_or_else(|| HostError::new(format!("invalid repository id: {}", id)))?;
            Ok(Repository {
                owner: owner.to_string(),
                name: name.to_string(),
                default_branch: repo.default_branch.clone(),
            })
        })
    }

    fn commit_range(&self, repo: &str, start: &str, end: &str) -> HostResult<Vec<String>> {
        self.with_repo(repo, |fixture| {
            let position = |name: &str| {
                fixture
                    .resolve(name)
                    .and_then(|sha| fixture.commits.iter().position(|commit| *commit == sha))
                    .ok_or_else(|| HostError::new(format!("HTTP 404: No commit found for {}", name)))
            };
            let start_index = position(start)?;
            let end_index = position(end)?;
            if end_index <= start_index {
                return Ok(Vec::new());
            }
            Ok(fixture.commits[start_index + 1..=end_index].to_vec())
        })
    }

    fn pull_requests_for_commit(&self, repo: &str, sha: &str) -> HostResult<Vec<u64>> {
        self.with_repo(repo, |fixture| {
            if fixture.failing_commits.contains(sha) {
                return Err(HostError::new(format!("HTTP 502: commits/{}/pulls", sha)));
            }
            Ok(fixture.pulls_by_commit.get(sha).cloned().unwrap_or_default())
        })
    }

    fn pull_request(&self, repo: &str, number: u64) -> HostResult<PullRequest> {
        self.with_repo(repo, |fixture| {
            if fixture.failing_pulls.contains(&number) {
                return Err(HostError::new(format!("HTTP 502: pulls/{}", number)));
            }
            fixture
                .pull_requests
                .iter()
                .find(|pr| pr.number == number)
                .cloned()
                .ok_or_else(|| HostError::new(format!("HTTP 404: pulls/{}", number)))
        })
    }

    fn issue(&self, repo: &str, number: u64) -> HostResult<Issue> {
        self.with_repo(repo, |fixture| {
            if fixture.failing_issues.contains(&number) {
                return Err(HostError::new(format!("HTTP 502: issues/{}", number)));
            }
            fixture
                .find_issue(number)
                .map(IssueFixture::to_issue)
                .ok_or_else(|| HostError::new(format!("HTTP 404: issues/{}", number)))
        })
    }

    fn parent_issue(&self, repo: &str, number: u64) -> HostResult<Option<u64>> {
        self.with_repo(repo, |fixture| {
            if fixture.failing_parents.contains(&number) {
                return Err(HostError::new(format!("GraphQL: parent lookup failed for #{}", number)));
            }
            fixture
                .find_issue(number)
                .map(|issue| issue.parent)
                .ok_or_else(|| HostError::new(format!("GraphQL: Could not resolve issue #{}", number)))
        })
    }

    fn list_releases(
        &self,
        repo: &str,
        limit: usize,
        exclude_prereleases: bool,
    ) -> HostResult<Vec<Release>> {
        self.with_repo(repo, |fixture| {
            let mut releases: Vec<Release> = fixture
                .releases
                .iter()
                .filter(|release| !(exclude_prereleases && release.is_prerelease))
                .cloned()
                .collect();
            releases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            releases.truncate(limit);
            Ok(releases)
        })
    }

    fn ref_sha(&self, repo: &str, git_ref: &GitRef) -> HostResult<String> {
        self.with_repo(repo, |fixture| {
            let sha = match git_ref {
                GitRef::Tag(name) => fixture.tags.get(name).cloned(),
                GitRef::Branch(name) if *name == fixture.default_branch => {
                    fixture.tip().map(str::to_string)
                }
                GitRef::Branch(name) => fixture.branches.get(name).cloned(),
            };
            sha.ok_or_else(|| HostError::new(format!("HTTP 404: git/ref/{}", git_ref.path())))
        })
    }

    fn merge_base(&self, repo: &str, a: &str, b: &str) -> HostResult<String> {
        self.with_repo(repo, |fixture| {
            let resolve = |name: &str| {
                fixture
                    .resolve(name)
                    .ok_or_else(|| HostError::new(format!("HTTP 404: No commit found for {}", name)))
            };
            let sha_a = resolve(a)?;
            let sha_b = resolve(b)?;
            if sha_a == sha_b {
                return Ok(sha_a);
            }
            let unrelated = || HostError::new(format!("No common ancestor between {} and {}", a, b));
            let pos_a = fixture.history_position(&sha_a).ok_or_else(unrelated)?;
            let pos_b = fixture.history_position(&sha_b).ok_or_else(unrelated)?;
            Ok(fixture.commits[pos_a.min(pos_b)].clone())
        })
    }

    fn create_release(&self, repo: &str, release: &NewRelease) -> HostResult<()> {
        self.with_repo_mut(repo, |fixture| {
            if fixture.releases.iter().any(|existing| existing.tag == release.tag) {
                return Err(HostError::new(format!(
                    "a release with tag {} already exists",
                    release.tag
                )));
            }
            let target = match &release.target {
                Some(sha) => sha.clone(),
                None => fixture
                    .tip()
                    .map(str::to_string)
                    .ok_or_else(|| HostError::new("repository has no commits"))?,
            };
            let created_at = fixture
                .releases
                .iter()
                .map(|existing| existing.created_at)
                .max()
                .map_or_else(DateTime::<Utc>::default, |latest| latest + Duration::seconds(1));

            fixture.tags.insert(release.tag.clone(), target);
            fixture.releases.push(Release {
                tag: release.tag.clone(),
                is_prerelease: release.prerelease,
                created_at,
            });
            Ok(())
        })?;
        self.record(HostMutation::ReleaseCreated {
            repo: repo.to_string(),
            release: release.clone(),
        });
        Ok(())
    }

    fn delete_release(&self, repo: &str, tag: &str) -> HostResult<()> {
        self.with_repo_mut(repo, |fixture| {
            if fixture.failing_deletions.contains(tag) {
                return Err(HostError::new(format!("HTTP 403: cannot delete release {}", tag)));
            }
            let before = fixture.releases.len();
            fixture.releases.retain(|release| release.tag != tag);
            if fixture.releases.len() == before {
                return Err(HostError::new(format!("release not found: {}", tag)));
            }
            Ok(())
        })?;
        self.record(HostMutation::ReleaseDeleted {
            repo: repo.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }

    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> HostResult<String> {
        self.with_repo(repo, |fixture| {
            if fixture.failing_comments.contains(&number) {
                return Err(HostError::new(format!("HTTP 403: issues/{}/comments", number)));
            }
            if fixture.find_issue(number).is_none() {
                return Err(HostError::new(format!("HTTP 404: issues/{}", number)));
            }
            Ok(())
        })?;
        let comment_id = self.mutations.borrow().len() + 1;
        self.record(HostMutation::CommentPosted {
            repo: repo.to_string(),
            number,
            body: body.to_string(),
        });
        Ok(format!(
            "{}#issuecomment-{}",
            self.links.issue(repo, number),
            comment_id
        ))
    }

    fn current_repository(&self) -> HostResult<Option<String>> {
        Ok(self.state.borrow().current_repository.clone())
    }
}
