// Rust guideline compliant 2026-10-16

//! Release creation workflow.

use crate::error::{AppError, Result};
use crate::options::{non_empty, CreateOptions, ModuleOptions};
use modrel_core::{
    compose_linked_issues_notes, is_prerelease_name, is_valid_version, latest_release,
    next_testing_release, resolve_commit, Error as CoreError, HostingApi, NewRelease,
};
use serde::Serialize;

/// Result of the `create` workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOutcome {
    /// Module repository.
    pub repo: String,
    /// Created tag.
    pub tag: String,
    /// Whether the release is a pre-release.
    pub prerelease: bool,
    /// Whether the release is a draft.
    pub draft: bool,
    /// Commit the release was pinned to, when given explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Release the notes were computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_release: Option<String>,
    /// Linked issues section appended to the generated notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Release page URL.
    pub url: String,
}

/// Creates a release of a module.
///
/// The release is a pre-release when `testing` is set or the name contains a
/// hyphen. Testing releases without a name get the next `-testing.N` name.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `module` - Shared module options
/// * `options` - Create options
///
/// # Returns
///
/// A description of the created release.
///
/// # Errors
///
/// Returns an error if:
/// - The repository or commit cannot be resolved
/// - No name is given for a stable release ([`AppError::MissingReleaseName`])
/// - The name is not a semantic version
/// - The latest release already is the branch head (nothing to release)
/// - The platform rejects the release
pub fn create_release(
    host: &dyn HostingApi,
    module: &ModuleOptions,
    options: &CreateOptions,
) -> Result<CreateOutcome> {
    let repo = module.resolve_repository(host)?;
    let repo_id = repo.id();
    let commit = resolve_commit(host, &repo, options.release_refs.as_deref())?;

    let requested = non_empty(options.release_name.as_deref());
    let prerelease = options.testing || requested.is_some_and(is_prerelease_name);

    let tag = match requested {
        Some(name) => name.to_string(),
        None if options.testing => next_testing_release(host, &repo)?,
        None => return Err(AppError::MissingReleaseName),
    };

    if !is_valid_version(&tag) {
        return Err(CoreError::Format(format!(
            "invalid semver format for release name: {}",
            tag
        ))
        .into());
    }

    // Pre-releases compare against any release, stable ones against the last stable.
    let previous_release = match latest_release(host, &repo_id, !prerelease) {
        Ok(release) => Some(release.tag),
        Err(err) => {
            tracing::debug!("No previous release for notes: {}", err);
            None
        }
    };

    let links = module.links();
    let notes = match (&previous_release, options.with_linked_issues) {
        (Some(previous), true) => {
            match compose_linked_issues_notes(host, &repo, previous, &module.issues_repo, &links) {
                Ok(notes) if !notes.is_empty() => Some(notes),
                Ok(_) => None,
                Err(err) => {
                    // Notes are optional: the release is still created without them.
                    tracing::warn!("Failed to compose linked issues notes: {}", err);
                    None
                }
            }
        }
        _ => None,
    };

    let release = NewRelease {
        tag: tag.clone(),
        title: tag.clone(),
        draft: options.draft,
        prerelease,
        target: commit.target().map(str::to_string),
        notes: notes.clone(),
    };
    host.create_release(&repo_id, &release)
        .map_err(|source| CoreError::transport("create release", source))?;

    tracing::info!("Created release {} in {}", tag, repo_id);

    Ok(CreateOutcome {
        url: links.release(&repo_id, &tag),
        repo: repo_id,
        tag,
        prerelease,
        draft: options.draft,
        target: release.target,
        previous_release,
        notes,
    })
}
