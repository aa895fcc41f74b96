// Rust guideline compliant 2026-10-16

//! Integration tests for release history queries and repository/commit resolution.

use chrono::{DateTime, TimeZone, Utc};
use modrel_core::{
    find_previous_release, latest_release, next_testing_release, prereleases_between,
    resolve_commit, resolve_repository, Error, FixtureHost, HostFixture, HostingApi,
    RepositoryFixture,
};

const REPO: &str = "NethServer/ns8-mail";

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

fn release_train() -> RepositoryFixture {
    RepositoryFixture::new("main")
        .commits(["c1", "c2", "c3", "c4", "c5"])
        .tag("1.0.0", "c1")
        .tag("1.0.1-testing.1", "c2")
        .tag("1.0.1-testing.2", "c3")
        .tag("1.0.1", "c4")
        .release("1.0.0", false, at(1))
        .release("1.0.1-testing.1", true, at(2))
        .release("1.0.1-testing.2", true, at(3))
        .release("1.0.1", false, at(4))
}

fn host(repo: RepositoryFixture) -> FixtureHost {
    FixtureHost::new(
        HostFixture::default()
            .with_repository(REPO, repo)
            .with_current_repository(REPO),
    )
}

fn tags(releases: Vec<modrel_core::Release>) -> Vec<String> {
    releases.into_iter().map(|release| release.tag).collect()
}

#[test]
fn test_clean_range_between_stable_releases() {
    let host = host(release_train());
    let stable = latest_release(&host, REPO, true).unwrap();
    let previous = find_previous_release(&host, REPO, &stable.tag, 1000).unwrap();
    let between = prereleases_between(&host, REPO, &previous.tag, &stable.tag, 1000).unwrap();

    assert_eq!(stable.tag, "1.0.1");
    assert_eq!(previous.tag, "1.0.0");
    assert_eq!(tags(between), vec!["1.0.1-testing.1", "1.0.1-testing.2"]);
}

#[test]
fn test_prereleases_between_unknown_bound() {
    let host = host(release_train());
    assert!(matches!(
        prereleases_between(&host, REPO, "0.9.0", "1.0.1", 1000),
        Err(Error::ReleaseNotFound(_))
    ));
}

#[test]
fn test_previous_stable_without_older_stable() {
    let repo = RepositoryFixture::new("main")
        .release("1.0.0-testing.1", true, at(1))
        .release("1.0.0", false, at(2));
    let host = host(repo);
    assert!(matches!(
        find_previous_release(&host, REPO, "1.0.0", 1000),
        Err(Error::NoPreviousRelease(_))
    ));
}

#[test]
fn test_creation_order_not_semver_order() {
    // A hotfix on an older line created last is the newest release.
    let repo = release_train().release("0.9.9", false, at(5));
    let host = host(repo);
    assert_eq!(latest_release(&host, REPO, true).unwrap().tag, "0.9.9");
    assert_eq!(
        find_previous_release(&host, REPO, "0.9.9", 1000).unwrap().tag,
        "1.0.1"
    );
}

#[test]
fn test_next_testing_release_from_prerelease() {
    let repo = release_train().release("1.0.2-testing.9", true, at(5)).tag("1.0.2-testing.9", "c4");
    let host = host(repo);
    let repository = host.repository(REPO).unwrap();
    assert_eq!(
        next_testing_release(&host, &repository).unwrap(),
        "1.0.2-testing.10"
    );
}

#[test]
fn test_resolve_repository_explicit_and_ambient() {
    let host = host(release_train());
    let explicit = resolve_repository(&host, Some(REPO), "ns8-").unwrap();
    assert_eq!(explicit.id(), REPO);

    let ambient = resolve_repository(&host, None, "ns8-").unwrap();
    assert_eq!(ambient.id(), REPO);

    let empty = resolve_repository(&host, Some(""), "ns8-").unwrap();
    assert_eq!(empty.id(), REPO);
}

#[test]
fn test_resolve_repository_errors() {
    let no_context = FixtureHost::new(HostFixture::default());
    assert!(matches!(
        resolve_repository(&no_context, None, "ns8-"),
        Err(Error::AmbiguousRepo)
    ));

    let host = host(release_train());
    assert!(matches!(
        resolve_repository(&host, Some("NethServer/mail"), "ns8-"),
        Err(Error::NamingConvention { .. })
    ));
    assert!(matches!(
        resolve_repository(&host, Some("NethServer/ns8-missing"), "ns8-"),
        Err(Error::RepositoryNotFound { .. })
    ));
}

#[test]
fn test_resolve_commit_implicit_tip() {
    let host = host(release_train());
    let repository = host.repository(REPO).unwrap();
    let commit = resolve_commit(&host, &repository, None).unwrap();
    assert_eq!(commit.sha, "c5");
    assert!(!commit.pinned);
    assert_eq!(commit.target(), None);
}

#[test]
fn test_resolve_commit_explicit_ancestor_is_pinned() {
    let host = host(release_train());
    let repository = host.repository(REPO).unwrap();
    let commit = resolve_commit(&host, &repository, Some("c3")).unwrap();
    assert_eq!(commit.target(), Some("c3"));
}

#[test]
fn test_resolve_commit_off_branch_fails() {
    let mut repo = release_train();
    repo.side_commits.insert("feature".to_string(), "c2".to_string());
    let host = host(repo);
    let repository = host.repository(REPO).unwrap();
    assert!(matches!(
        resolve_commit(&host, &repository, Some("feature")),
        Err(Error::NotAncestor { .. })
    ));
}

#[test]
fn test_resolve_commit_unknown_sha_is_transport_error() {
    let host = host(release_train());
    let repository = host.repository(REPO).unwrap();
    assert!(matches!(
        resolve_commit(&host, &repository, Some("deadbeef")),
        Err(Error::Transport { .. })
    ));
}
