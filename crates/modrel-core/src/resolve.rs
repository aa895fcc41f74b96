// Rust guideline compliant 2026-10-12

//! Repository and commit resolution.

use crate::hosting::HostingApi;
use crate::models::{CommitRef, GitRef, Repository};
use crate::{Error, Result};

/// Checks that a repository identifier follows the `<owner>/<prefix>*` convention.
///
/// # Arguments
///
/// * `repo` - Repository identifier (`owner/name`)
/// * `prefix` - Required module name prefix (e.g. `ns8-`)
///
/// # Errors
///
/// Returns [`Error::NamingConvention`] if the owner is empty or the name does
/// not start with `prefix`.
pub fn validate_repository_name(repo: &str, prefix: &str) -> Result<()> {
    let matches = repo
        .split_once('/')
        .is_some_and(|(owner, name)| !owner.is_empty() && name.starts_with(prefix));

    if matches {
        Ok(())
    } else {
        Err(Error::NamingConvention {
            repo: repo.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// Resolves the module repository to operate on.
///
/// An explicit identifier wins; otherwise the ambient working-directory
/// repository reported by the host is used.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `explicit` - Identifier given by the caller, if any (empty counts as absent)
/// * `prefix` - Required module name prefix
///
/// # Returns
///
/// The repository as reported by the host.
///
/// # Errors
///
/// Returns an error if:
/// - No repository is given and none can be inferred ([`Error::AmbiguousRepo`])
/// - The identifier breaks the naming convention ([`Error::NamingConvention`])
/// - The repository lookup fails ([`Error::RepositoryNotFound`])
pub fn resolve_repository(
    host: &dyn HostingApi,
    explicit: Option<&str>,
    prefix: &str,
) -> Result<Repository> {
    let id = match explicit.filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => match host.current_repository() {
            Ok(Some(id)) if !id.is_empty() => id,
            Ok(_) => return Err(Error::AmbiguousRepo),
            Err(err) => {
                tracing::debug!("Repository context lookup failed: {}", err);
                return Err(Error::AmbiguousRepo);
            }
        },
    };

    validate_repository_name(&id, prefix)?;

    host.repository(&id)
        .map_err(|source| Error::RepositoryNotFound { repo: id, source })
}

/// Resolves the commit a release is created from.
///
/// Without an explicit SHA the default-branch tip is used and no release
/// target is pinned. An explicit SHA must be reachable from the default
/// branch (the merge base of the branch and the SHA is the SHA itself) and is
/// pinned as the release target.
///
/// # Errors
///
/// Returns an error if:
/// - The branch tip or merge base cannot be fetched ([`Error::Transport`])
/// - The explicit commit is not on the default branch ([`Error::NotAncestor`])
pub fn resolve_commit(
    host: &dyn HostingApi,
    repo: &Repository,
    explicit: Option<&str>,
) -> Result<CommitRef> {
    let repo_id = repo.id();

    let Some(sha) = explicit.filter(|sha| !sha.is_empty()) else {
        let tip = host
            .ref_sha(&repo_id, &GitRef::Branch(repo.default_branch.clone()))
            .map_err(|source| Error::transport("determine the latest commit sha", source))?;
        return Ok(CommitRef {
            sha: tip,
            pinned: false,
        });
    };

    let merge_base = host
        .merge_base(&repo_id, &repo.default_branch, sha)
        .map_err(|source| {
            Error::transport("check if the commit is on the default branch", source)
        })?;

    if merge_base != sha {
        return Err(Error::NotAncestor {
            sha: sha.to_string(),
            branch: repo.default_branch.clone(),
        });
    }

    Ok(CommitRef {
        sha: sha.to_string(),
        pinned: true,
    })
}
