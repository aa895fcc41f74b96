// Rust guideline compliant 2026-10-12

//! modrel Core Library
//!
//! This crate provides the release-readiness engine for hosted modules:
//! - Data models (Repository, PullRequest, Issue, Release)
//! - The `HostingApi` port and an in-memory fixture host
//! - Version sequencing (semver validation, next testing version)
//! - Repository and commit resolution
//! - Release history queries
//! - Linkage scanning (commits, pull requests, linked issues)
//! - Readiness aggregation and release notes composition
//! - Configuration and error types

pub mod config;
pub mod error;
pub mod fixture;
pub mod hosting;
pub mod linkage;
pub mod links;
pub mod models;
pub mod notes;
pub mod readiness;
pub mod releases;
pub mod resolve;
pub mod version;

pub use config::{Config, OutputFormat};
pub use error::{Error, HostError, HostResult, Result};
pub use fixture::{FixtureHost, HostFixture, HostMutation, IssueFixture, RepositoryFixture};
pub use hosting::HostingApi;
pub use linkage::{
    classify_pull_request, extract_linked_issues, extract_linked_issues_on, scan_commits,
    scan_pull_requests, PullRequestClass, ScanOutcome,
};
pub use links::WebLinks;
pub use models::{CommitRef, GitRef, Issue, NewRelease, PullRequest, Release, Repository};
pub use notes::compose_linked_issues_notes;
pub use readiness::{
    check_readiness, CheckOutcome, CheckReport, CheckSummary, DisplayEntry, IssueInfo,
    IssueStatus, ProgressTier, SkippedItem,
};
pub use releases::{
    find_previous_release, latest_release, next_testing_release, prereleases_between,
};
pub use resolve::{resolve_commit, resolve_repository, validate_repository_name};
pub use version::{is_prerelease_name, is_valid_version, next_testing_version};
