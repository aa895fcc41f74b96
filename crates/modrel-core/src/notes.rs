// Rust guideline compliant 2026-10-13

//! Release notes composition.

use crate::hosting::HostingApi;
use crate::linkage::{extract_linked_issues_on, scan_pull_requests};
use crate::links::WebLinks;
use crate::models::Repository;
use crate::Result;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Heading of the linked issues section.
pub const LINKED_ISSUES_HEADING: &str = "## Linked Issues";

/// Composes a release notes fragment listing the issues linked since a release.
///
/// Scans `previous_tag..<default branch>`, collects every issue referenced by
/// the pull requests of the range (the first fetched title wins), and renders
/// one bullet per issue in issue-number order. Pull requests or issues that
/// cannot be fetched are skipped.
///
/// # Arguments
///
/// * `host` - Hosting platform
/// * `repo` - Module repository
/// * `previous_tag` - Release the range starts from
/// * `issues_repo` - Issues repository
/// * `links` - Web host for matching and rendering issue links
///
/// # Returns
///
/// The notes fragment, or an empty string when no linked issue is found.
///
/// # Errors
///
/// Returns the scan errors of [`scan_pull_requests`]. Callers composing
/// optional notes are expected to degrade to no notes on error.
pub fn compose_linked_issues_notes(
    host: &dyn HostingApi,
    repo: &Repository,
    previous_tag: &str,
    issues_repo: &str,
    links: &WebLinks,
) -> Result<String> {
    let repo_id = repo.id();
    let scan = scan_pull_requests(host, &repo_id, previous_tag, &repo.default_branch)?;

    let mut titles: BTreeMap<u64, String> = BTreeMap::new();
    for number in &scan.pull_requests {
        let pr = match host.pull_request(&repo_id, *number) {
            Ok(pr) => pr,
            Err(err) => {
                tracing::warn!("Skipping pull request {}: {}", number, err);
                continue;
            }
        };

        for issue_number in extract_linked_issues_on(&pr.body, issues_repo, links.host()) {
            if titles.contains_key(&issue_number) {
                continue;
            }
            match host.issue(issues_repo, issue_number) {
                Ok(issue) => {
                    titles.insert(issue_number, issue.title);
                }
                Err(err) => tracing::warn!("Skipping issue {}: {}", issue_number, err),
            }
        }
    }

    if titles.is_empty() {
        return Ok(String::new());
    }

    let mut notes = format!("{}\n", LINKED_ISSUES_HEADING);
    for (number, title) in &titles {
        // Writing to a String cannot fail.
        let _ = writeln!(
            notes,
            "- [{}#{}]({}): {}",
            issues_repo,
            number,
            links.issue(issues_repo, *number),
            title
        );
    }
    Ok(notes)
}
