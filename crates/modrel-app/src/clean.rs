// Rust guideline compliant 2026-10-17

//! Pre-release cleanup workflow.

use crate::error::{AppError, Result};
use crate::options::{non_empty, CleanOptions, ModuleOptions};
use modrel_core::{
    find_previous_release, is_prerelease_name, latest_release, prereleases_between,
    Error as CoreError, HostingApi,
};
use serde::Serialize;

/// A pre-release that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFailure {
    /// Release tag.
    pub tag: String,
    /// Failure message.
    pub message: String,
}

/// Result of the `clean` workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanOutcome {
    /// Module repository.
    pub repo: String,
    /// Stable release the cleanup ends at.
    pub stable: String,
    /// Previous stable release the cleanup starts after.
    pub previous: String,
    /// Pre-releases between the two, oldest first.
    pub prereleases: Vec<String>,
    /// Deleted pre-releases.
    pub deleted: Vec<String>,
    /// Deletions that failed.
    pub failures: Vec<DeleteFailure>,
    /// Whether deletion was skipped.
    pub dry_run: bool,
}

/// Deletes the pre-releases created between two stable releases.
///
/// The end is the named stable release (or the latest stable one); the start
/// is the stable release before it.
///
/// # Errors
///
/// Returns an error if:
/// - The repository cannot be resolved
/// - The named release is a pre-release ([`AppError::InvalidInput`])
/// - There is no stable release, or the named release is not listed
/// - There is no previous stable release
///
/// Failed deletions are reported in [`CleanOutcome::failures`].
pub fn clean_prereleases(
    host: &dyn HostingApi,
    module: &ModuleOptions,
    options: &CleanOptions,
) -> Result<CleanOutcome> {
    let repo = module.resolve_repository(host)?;
    let repo_id = repo.id();
    let limit = module.release_list_limit;

    let stable = match non_empty(options.release_name.as_deref()) {
        Some(tag) if is_prerelease_name(tag) => {
            return Err(AppError::InvalidInput(format!(
                "{} is a pre-release; name the stable release to clean up",
                tag
            )));
        }
        Some(tag) => tag.to_string(),
        None => latest_release(host, &repo_id, true)?.tag,
    };
    let previous = find_previous_release(host, &repo_id, &stable, limit)?.tag;
    let prereleases: Vec<String> = prereleases_between(host, &repo_id, &previous, &stable, limit)?
        .into_iter()
        .map(|release| release.tag)
        .collect();

    tracing::debug!(
        "Found {} pre-release(s) between {} and {}",
        prereleases.len(),
        previous,
        stable
    );

    let mut deleted = Vec::new();
    let mut failures = Vec::new();
    if !options.dry_run {
        for tag in &prereleases {
            match host.delete_release(&repo_id, tag) {
                Ok(()) => {
                    tracing::info!("Deleted release {} from {}", tag, repo_id);
                    deleted.push(tag.clone());
                }
                Err(source) => {
                    let err = CoreError::transport(format!("delete release {}", tag), source);
                    tracing::warn!("{}", err);
                    failures.push(DeleteFailure {
                        tag: tag.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    Ok(CleanOutcome {
        repo: repo_id,
        stable,
        previous,
        prereleases,
        deleted,
        failures,
        dry_run: options.dry_run,
    })
}
