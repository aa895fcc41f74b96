// Rust guideline compliant 2026-10-13

//! Release history queries.
//!
//! Release history is ordered by creation time as reported by the host,
//! never by semantic-version precedence.

use crate::hosting::HostingApi;
use crate::models::{GitRef, Release, Repository};
use crate::version::{is_valid_version, next_testing_version};
use crate::{Error, Result};

/// Returns the newest release of a repository.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `repo` - Repository identifier
/// * `exclude_prereleases` - Only consider stable releases
///
/// # Errors
///
/// Returns [`Error::NoRelease`] if there is no matching release, or
/// [`Error::Transport`] if the listing fails.
pub fn latest_release(
    host: &dyn HostingApi,
    repo: &str,
    exclude_prereleases: bool,
) -> Result<Release> {
    host.list_releases(repo, 1, exclude_prereleases)
        .map_err(|source| Error::transport("list releases", source))?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoRelease(repo.to_string()))
}

fn list_history(host: &dyn HostingApi, repo: &str, limit: usize) -> Result<Vec<Release>> {
    host.list_releases(repo, limit, false)
        .map_err(|source| Error::transport("list releases", source))
}

/// Finds the release preceding `tag` in creation order.
///
/// For a pre-release the immediately older release of any kind is returned;
/// for a stable release, intervening pre-releases are skipped and the nearest
/// older stable release is returned.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `repo` - Repository identifier
/// * `tag` - Tag of the current release
/// * `limit` - Maximum number of releases to inspect
///
/// # Errors
///
/// Returns an error if:
/// - `tag` is not in the listing ([`Error::ReleaseNotFound`])
/// - No qualifying older release exists ([`Error::NoPreviousRelease`])
/// - The listing fails ([`Error::Transport`])
pub fn find_previous_release(
    host: &dyn HostingApi,
    repo: &str,
    tag: &str,
    limit: usize,
) -> Result<Release> {
    let history = list_history(host, repo, limit)?;

    let index = history
        .iter()
        .position(|release| release.tag == tag)
        .ok_or_else(|| Error::ReleaseNotFound(tag.to_string()))?;
    let current = &history[index];

    let mut older = history[index + 1..].iter();
    let previous = if current.is_prerelease {
        older.next()
    } else {
        older.find(|release| !release.is_prerelease)
    };

    previous
        .cloned()
        .ok_or_else(|| Error::NoPreviousRelease(tag.to_string()))
}

/// Lists the pre-releases created after `start` and up to `end`.
///
/// A pre-release qualifies when `start.created_at < created_at <= end.created_at`.
///
/// # Returns
///
/// The qualifying pre-releases, oldest first.
///
/// # Errors
///
/// Returns [`Error::ReleaseNotFound`] if either bound is not in the listing,
/// or [`Error::Transport`] if the listing fails.
pub fn prereleases_between(
    host: &dyn HostingApi,
    repo: &str,
    start: &str,
    end: &str,
    limit: usize,
) -> Result<Vec<Release>> {
    let history = list_history(host, repo, limit)?;

    let created_at = |tag: &str| {
        history
            .iter()
            .find(|release| release.tag == tag)
            .map(|release| release.created_at)
            .ok_or_else(|| Error::ReleaseNotFound(tag.to_string()))
    };
    let start_time = created_at(start)?;
    let end_time = created_at(end)?;

    let mut between: Vec<Release> = history
        .iter()
        .filter(|release| {
            release.is_prerelease && release.created_at > start_time && release.created_at <= end_time
        })
        .cloned()
        .collect();
    between.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(between)
}

/// Derives the name of the next testing release.
///
/// The newest release of any kind is the base. It must be a valid semantic
/// version, and its tag must not point at the default-branch tip.
///
/// # Errors
///
/// Returns an error if:
/// - The repository has no release ([`Error::NoRelease`])
/// - The latest tag is not a semantic version ([`Error::Format`])
/// - The latest tag is the branch head ([`Error::NothingToRelease`])
/// - A ref lookup fails ([`Error::Transport`])
pub fn next_testing_release(host: &dyn HostingApi, repo: &Repository) -> Result<String> {
    let repo_id = repo.id();
    let latest = latest_release(host, &repo_id, false)?;

    if !is_valid_version(&latest.tag) {
        return Err(Error::Format(format!(
            "invalid semver format for the latest release: {}",
            latest.tag
        )));
    }

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
        return Err(Error::NothingToRelease {
            tag: latest.tag,
            branch: repo.default_branch.clone(),
        });
    }

    next_testing_version(&latest.tag, latest.is_prerelease)
}
