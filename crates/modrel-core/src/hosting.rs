// Rust guideline compliant 2026-10-12

//! Hosting platform port.
//!
//! The engine reaches the code-hosting platform only through this trait.
//! Implementations are synchronous and treated as stateless, idempotent
//! readers for the duration of one command; the live adapter lives in the
//! CLI crate and [`crate::FixtureHost`] serves snapshots for tests and
//! offline runs.

use crate::error::HostResult;
use crate::models::{GitRef, Issue, NewRelease, PullRequest, Release, Repository};

/// Access to repositories, commits, pull requests, issues and releases.
pub trait HostingApi {
    /// Fetches repository information.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository does not exist or is not accessible.
    fn repository(&self, id: &str) -> HostResult<Repository>;

    /// Lists the commits reachable from `end` but not from `start`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if either ref is unknown.
    fn commit_range(&self, repo: &str, start: &str, end: &str) -> HostResult<Vec<String>>;

    /// Lists the numbers of pull requests associated with a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn pull_requests_for_commit(&self, repo: &str, sha: &str) -> HostResult<Vec<u64>>;

    /// Fetches a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the pull request cannot be fetched.
    fn pull_request(&self, repo: &str, number: u64) -> HostResult<PullRequest>;

    /// Fetches an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be fetched.
    fn issue(&self, repo: &str, number: u64) -> HostResult<Issue>;

    /// Returns the parent issue number, if the issue is a sub-issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn parent_issue(&self, repo: &str, number: u64) -> HostResult<Option<u64>>;

    /// Lists releases, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    fn list_releases(
        &self,
        repo: &str,
        limit: usize,
        exclude_prereleases: bool,
    ) -> HostResult<Vec<Release>>;

    /// Resolves a ref to the commit SHA it points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref does not exist.
    fn ref_sha(&self, repo: &str, git_ref: &GitRef) -> HostResult<String>;

    /// Returns the merge base of two commits or refs.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is unknown.
    fn merge_base(&self, repo: &str, a: &str, b: &str) -> HostResult<String>;

    /// Creates a release.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the release.
    fn create_release(&self, repo: &str, release: &NewRelease) -> HostResult<()>;

    /// Deletes a release by tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the release cannot be deleted.
    fn delete_release(&self, repo: &str, tag: &str) -> HostResult<()>;

    /// Posts a comment on an issue and returns the comment URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment cannot be posted.
    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> HostResult<String>;

    /// Returns the repository of the ambient working directory, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the context lookup itself fails.
    fn current_repository(&self) -> HostResult<Option<String>>;
}
