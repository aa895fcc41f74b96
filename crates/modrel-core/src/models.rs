// Rust guideline compliant 2026-10-12

//! Core data models for modrel.
//!
//! All models are point-in-time snapshots of what the hosting platform
//! reported; the engine never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Basic repository information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Owner login.
    pub owner: String,
    /// Repository name without owner.
    pub name: String,
    /// Name of the default branch.
    pub default_branch: String,
}

impl Repository {
    /// Returns the `owner/name` identifier.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A pull request snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Free-text description; empty when the platform reports none.
    #[serde(default)]
    pub body: String,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl PullRequest {
    /// Returns whether the pull request carries the given label.
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

/// An issue snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    #[serde(default)]
    pub title: String,
    /// Literal state string reported by the platform (e.g. `open`, `CLOSED`).
    pub state: String,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Issue {
    /// Returns whether the platform reports the issue as closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.eq_ignore_ascii_case("closed")
    }
}

/// A published (or draft) release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Tag name.
    pub tag: String,
    /// Whether the release is flagged as a pre-release.
    #[serde(default)]
    pub is_prerelease: bool,
    /// Creation timestamp; release history is ordered by this field.
    pub created_at: DateTime<Utc>,
}

/// Parameters of a release to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    /// Tag to create.
    pub tag: String,
    /// Release title.
    pub title: String,
    /// Create as draft.
    pub draft: bool,
    /// Flag as pre-release.
    pub prerelease: bool,
    /// Explicit commit to tag; `None` lets the platform use the default branch tip.
    pub target: Option<String>,
    /// Extra release notes appended to the generated ones.
    pub notes: Option<String>,
}

/// A git reference addressable through the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GitRef {
    /// `refs/tags/<name>`
    Tag(String),
    /// `refs/heads/<name>`
    Branch(String),
}

impl GitRef {
    /// Returns the ref path relative to `refs/` (e.g. `tags/1.0.0`).
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            GitRef::Tag(name) => format!("tags/{}", name),
            GitRef::Branch(name) => format!("heads/{}", name),
        }
    }

    /// Returns the short ref name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            GitRef::Tag(name) | GitRef::Branch(name) => name,
        }
    }
}

/// A resolved commit to release from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRef {
    /// Resolved commit SHA.
    pub sha: String,
    /// Whether the commit was pinned explicitly by the caller.
    pub pinned: bool,
}

impl CommitRef {
    /// Returns the release target override, present only for pinned commits.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.pinned.then_some(self.sha.as_str())
    }
}
