// Rust guideline compliant 2026-10-16

//! Readiness check workflow.

use crate::error::Result;
use crate::options::ModuleOptions;
use modrel_core::{check_readiness, CheckOutcome, HostingApi};
use serde::Serialize;

/// Result of the `check` workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResponse {
    /// Module repository.
    pub repo: String,
    /// Check outcome.
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

/// Checks whether the module is ready to be released.
///
/// # Errors
///
/// Returns an error if the repository cannot be resolved, the module has no
/// stable release, or the range since the latest stable release cannot be scanned.
pub fn run_check(host: &dyn HostingApi, module: &ModuleOptions) -> Result<CheckResponse> {
    let repo = module.resolve_repository(host)?;
    let outcome = check_readiness(host, &repo, &module.issues_repo, &module.links())?;

    if let CheckOutcome::Report(report) = &outcome {
        tracing::debug!(
            "Check of {} since {}: ready={} skipped={}",
            repo.id(),
            report.since,
            report.ready,
            report.summary.skipped.len()
        );
    }

    Ok(CheckResponse {
        repo: repo.id(),
        outcome,
    })
}
