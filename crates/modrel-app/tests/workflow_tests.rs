// Rust guideline compliant 2026-10-17

//! Integration tests for the release workflows.
//!
//! All workflows run against a fixture host describing one module with a
//! full release train and an issues repository with a small epic.

use chrono::{DateTime, TimeZone, Utc};
use modrel_app::{
    clean_prereleases, comment_release, create_release, run_check, AppError, CleanOptions,
    CommentOptions, CreateOptions, ErrorCode, ModuleOptions,
};
use modrel_core::{
    CheckOutcome, Config, FixtureHost, HostFixture, HostMutation, IssueFixture, RepositoryFixture,
};

const MODULE: &str = "NethServer/ns8-mail";
const ISSUES: &str = "NethServer/dev";

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

fn module_repo() -> RepositoryFixture {
    RepositoryFixture::new("main")
        .commits(["c1", "c2", "c3", "c4", "c5", "c6"])
        .tag("1.0.0", "c1")
        .tag("1.0.1-testing.1", "c3")
        .tag("1.0.1-testing.2", "c4")
        .tag("1.0.1", "c5")
        .release("1.0.0", false, at(1))
        .release("1.0.1-testing.1", true, at(2))
        .release("1.0.1-testing.2", true, at(3))
        .release("1.0.1", false, at(4))
        .pulls("c2", &[1])
        .pulls("c3", &[2])
        .pulls("c4", &[3])
        .pulls("c5", &[4])
        .pulls("c6", &[5])
        .pull_request(1, "Fixes NethServer/dev#10", &[])
        .pull_request(2, "Fixes https://github.com/NethServer/dev/issues/11", &[])
        .pull_request(3, "Part of NethServer/dev#12", &[])
        .pull_request(4, "Fix typo", &[])
        .pull_request(5, "Closes NethServer/dev#13", &[])
}

fn issues_repo() -> RepositoryFixture {
    let mut tracker = RepositoryFixture::new("main");
    tracker.issues = vec![
        IssueFixture::new(10, "Mail filter").parent(20),
        IssueFixture::new(11, "Old bug").state("CLOSED"),
        IssueFixture::new(12, "Quota report").parent(20),
        IssueFixture::new(13, "Spam settings"),
        IssueFixture::new(20, "Mail epic"),
    ];
    tracker
}

fn host_with(module: RepositoryFixture, issues: RepositoryFixture) -> FixtureHost {
    FixtureHost::new(
        HostFixture::default()
            .with_repository(MODULE, module)
            .with_repository(ISSUES, issues),
    )
}

fn host() -> FixtureHost {
    host_with(module_repo(), issues_repo())
}

fn module_options() -> ModuleOptions {
    ModuleOptions::from_config(&Config::default(), Some(MODULE.to_string()))
}

#[test]
fn test_create_testing_release_derives_name_and_notes() {
    let host = host();
    let options = CreateOptions {
        testing: true,
        with_linked_issues: true,
        ..CreateOptions::default()
    };
    let outcome = create_release(&host, &module_options(), &options).unwrap();

    assert_eq!(outcome.tag, "1.0.2-testing.1");
    assert!(outcome.prerelease);
    assert_eq!(outcome.previous_release.as_deref(), Some("1.0.1"));
    assert_eq!(outcome.target, None);
    assert_eq!(
        outcome.notes.as_deref(),
        Some("## Linked Issues\n- [NethServer/dev#13](https://github.com/NethServer/dev/issues/13): Spam settings\n")
    );

    let mutations = host.mutations();
    assert_eq!(mutations.len(), 1);
    let HostMutation::ReleaseCreated { release, .. } = &mutations[0] else {
        panic!("expected a created release, got {:?}", mutations[0]);
    };
    assert_eq!(release.title, "1.0.2-testing.1");
    assert!(release.prerelease);
    assert!(!release.draft);
}

#[test]
fn test_create_stable_pinned_release() {
    let host = host();
    let options = CreateOptions {
        release_refs: Some("c5".to_string()),
        release_name: Some("1.0.2".to_string()),
        draft: true,
        ..CreateOptions::default()
    };
    let outcome = create_release(&host, &module_options(), &options).unwrap();

    assert_eq!(outcome.tag, "1.0.2");
    assert!(!outcome.prerelease);
    assert!(outcome.draft);
    assert_eq!(outcome.target.as_deref(), Some("c5"));
    assert_eq!(outcome.notes, None);
    assert_eq!(
        outcome.url,
        "https://github.com/NethServer/ns8-mail/releases/tag/1.0.2"
    );
}

#[test]
fn test_create_hyphenated_name_is_prerelease() {
    let host = host();
    let options = CreateOptions {
        release_name: Some("1.0.2-rc.1".to_string()),
        ..CreateOptions::default()
    };
    let outcome = create_release(&host, &module_options(), &options).unwrap();
    assert!(outcome.prerelease);
}

#[test]
fn test_create_requires_name_for_stable_release() {
    let host = host();
    let err = create_release(&host, &module_options(), &CreateOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::MissingReleaseName));
    assert!(host.mutations().is_empty());
}

#[test]
fn test_create_rejects_invalid_name() {
    let host = host();
    let options = CreateOptions {
        release_name: Some("v2".to_string()),
        ..CreateOptions::default()
    };
    let err = create_release(&host, &module_options(), &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidVersion);
}

#[test]
fn test_create_rejects_commit_off_branch() {
    let mut module = module_repo();
    module
        .side_commits
        .insert("feature".to_string(), "c3".to_string());
    let host = host_with(module, issues_repo());
    let options = CreateOptions {
        release_refs: Some("feature".to_string()),
        release_name: Some("1.0.2".to_string()),
        ..CreateOptions::default()
    };
    let err = create_release(&host, &module_options(), &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAncestor);
}

#[test]
fn test_create_testing_with_nothing_to_release() {
    let module = module_repo().tag("1.0.1", "c6");
    let host = host_with(module, issues_repo());
    let options = CreateOptions {
        testing: true,
        ..CreateOptions::default()
    };
    let err = create_release(&host, &module_options(), &options).unwrap_err();
    assert!(err.is_nothing_to_release());
    assert_eq!(err.code(), ErrorCode::NothingToRelease);
}

#[test]
fn test_create_notes_failure_is_swallowed() {
    // The range since 1.0.1 has no pull request, so notes cannot be composed.
    let mut module = module_repo();
    module.pulls_by_commit.remove("c6");
    let host = host_with(module, issues_repo());
    let options = CreateOptions {
        release_name: Some("1.0.2".to_string()),
        with_linked_issues: true,
        ..CreateOptions::default()
    };
    let outcome = create_release(&host, &module_options(), &options).unwrap();
    assert_eq!(outcome.notes, None);
    assert_eq!(host.mutations().len(), 1);
}

#[test]
fn test_create_rejects_foreign_repository() {
    let host = host();
    let module = ModuleOptions {
        repo: Some("NethServer/mail".to_string()),
        ..module_options()
    };
    let err = create_release(&host, &module, &CreateOptions::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidRepository);
}

#[test]
fn test_check_reports_open_work() {
    let host = host();
    let response = run_check(&host, &module_options()).unwrap();
    assert_eq!(response.repo, MODULE);

    let CheckOutcome::Report(report) = response.outcome else {
        panic!("expected a report");
    };
    assert_eq!(report.since, "1.0.1");
    assert!(!report.ready);
    assert!(report.summary.issues.contains_key(&13));
}

#[test]
fn test_check_serializes_flat_outcome() {
    let module = module_repo().tag("1.0.1", "c6");
    let host = host_with(module, issues_repo());
    let response = run_check(&host, &module_options()).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["repo"], MODULE);
    assert_eq!(value["outcome"], "nothing_to_release");
    assert_eq!(value["tag"], "1.0.1");
}

#[test]
fn test_comment_stable_release_dedupes_parents() {
    let host = host();
    let outcome = comment_release(&host, &module_options(), &CommentOptions::default()).unwrap();

    assert_eq!(outcome.release, "1.0.1");
    assert_eq!(outcome.previous_release, "1.0.0");
    assert!(!outcome.prerelease);
    assert_eq!(outcome.linked_issues, vec![10, 11, 12]);
    assert_eq!(outcome.closed, vec![11]);
    assert!(outcome.body.starts_with("Release `NethServer/ns8-mail` [1.0.1]"));

    let commented: Vec<(u64, Option<u64>)> = outcome
        .comments
        .iter()
        .map(|comment| (comment.number, comment.parent_of))
        .collect();
    assert_eq!(commented, vec![(10, None), (20, Some(10)), (12, None)]);
    assert_eq!(host.mutations().len(), 3);
}

#[test]
fn test_comment_testing_release() {
    let host = host();
    let options = CommentOptions {
        release: Some("1.0.1-testing.2".to_string()),
    };
    let outcome = comment_release(&host, &module_options(), &options).unwrap();

    assert!(outcome.prerelease);
    assert_eq!(outcome.previous_release, "1.0.1-testing.1");
    assert_eq!(outcome.linked_issues, vec![12]);
    assert!(outcome.body.starts_with("Testing release "));
    assert_eq!(outcome.comments.len(), 2);
}

#[test]
fn test_comment_unknown_release() {
    let host = host();
    let options = CommentOptions {
        release: Some("9.9.9".to_string()),
    };
    let err = comment_release(&host, &module_options(), &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[test]
fn test_comment_failures_are_collected() {
    let mut issues = issues_repo();
    issues.failing_comments.insert(10);
    let host = host_with(module_repo(), issues);
    let outcome = comment_release(&host, &module_options(), &CommentOptions::default()).unwrap();

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].number, 10);
    let commented: Vec<u64> = outcome.comments.iter().map(|comment| comment.number).collect();
    assert_eq!(commented, vec![12, 20]);
}

#[test]
fn test_clean_deletes_prereleases_between_stables() {
    let host = host();
    let outcome = clean_prereleases(&host, &module_options(), &CleanOptions::default()).unwrap();

    assert_eq!(outcome.stable, "1.0.1");
    assert_eq!(outcome.previous, "1.0.0");
    assert_eq!(outcome.prereleases, vec!["1.0.1-testing.1", "1.0.1-testing.2"]);
    assert_eq!(outcome.deleted, outcome.prereleases);
    assert!(outcome.failures.is_empty());

    let deleted: Vec<String> = host
        .mutations()
        .into_iter()
        .filter_map(|mutation| match mutation {
            HostMutation::ReleaseDeleted { tag, .. } => Some(tag),
            _ => None,
        })
        .collect();
    assert_eq!(deleted, vec!["1.0.1-testing.1", "1.0.1-testing.2"]);

    let remaining: Vec<String> = host.snapshot().repositories[MODULE]
        .releases
        .iter()
        .map(|release| release.tag.clone())
        .collect();
    assert_eq!(remaining, vec!["1.0.0", "1.0.1"]);
}

#[test]
fn test_clean_rejects_prerelease_name() {
    let host = host();
    let options = CleanOptions {
        release_name: Some("1.0.1-testing.2".to_string()),
        ..CleanOptions::default()
    };
    let err = clean_prereleases(&host, &module_options(), &options).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert!(host.mutations().is_empty());
}

#[test]
fn test_clean_dry_run_keeps_releases() {
    let host = host();
    let options = CleanOptions {
        dry_run: true,
        ..CleanOptions::default()
    };
    let outcome = clean_prereleases(&host, &module_options(), &options).unwrap();

    assert_eq!(outcome.prereleases.len(), 2);
    assert!(outcome.deleted.is_empty());
    assert!(host.mutations().is_empty());
}

#[test]
fn test_clean_reports_failed_deletion() {
    let mut module = module_repo();
    module.failing_deletions.insert("1.0.1-testing.1".to_string());
    let host = host_with(module, issues_repo());
    let outcome = clean_prereleases(&host, &module_options(), &CleanOptions::default()).unwrap();

    assert_eq!(outcome.deleted, vec!["1.0.1-testing.2"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].tag, "1.0.1-testing.1");
}

#[test]
fn test_clean_without_previous_stable() {
    let host = host();
    let options = CleanOptions {
        release_name: Some("1.0.0".to_string()),
        ..CleanOptions::default()
    };
    let err = clean_prereleases(&host, &module_options(), &options).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}
