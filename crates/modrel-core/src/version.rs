// Rust guideline compliant 2026-10-12

//! Version sequencing.
//!
//! Pure functions validating release names against the semantic-versioning
//! grammar and deriving the next `-testing.N` pre-release name.

use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

// Grammar from semver.org: numeric identifiers without leading zeros,
// optional dot-separated pre-release and build identifiers.
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(-((0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(\.(0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(\+([0-9a-zA-Z-]+(\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("valid semver regex")
});
static TESTING_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*-testing\.)(\d+)$").expect("valid testing suffix regex"));
static LEADING_TRIPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)").expect("valid version triple regex"));

/// Returns whether `version` matches the semantic-versioning grammar.
///
/// # Arguments
///
/// * `version` - Candidate version string (no `v` prefix)
///
/// # Returns
///
/// `true` for `major.minor.patch` with optional `-prerelease` and `+build` parts.
#[must_use]
pub fn is_valid_version(version: &str) -> bool {
    SEMVER_RE.is_match(version)
}

/// Returns whether a release name denotes a pre-release (contains a hyphen).
#[must_use]
pub fn is_prerelease_name(version: &str) -> bool {
    version.contains('-')
}

/// Derives the next testing version from the latest release tag.
///
/// * `1.0.1-testing.9` (pre-release) becomes `1.0.1-testing.10`
/// * `1.0.0` (stable) becomes `1.0.1-testing.1`
///
/// # Arguments
///
/// * `latest_tag` - Tag of the latest release
/// * `latest_is_prerelease` - Whether that release is flagged as a pre-release
///
/// # Errors
///
/// Returns [`Error::Format`] if a pre-release tag lacks the `-testing.N`
/// suffix, or a stable tag lacks a leading `major.minor.patch` triple.
pub fn next_testing_version(latest_tag: &str, latest_is_prerelease: bool) -> Result<String> {
    if latest_is_prerelease {
        increment_testing_number(latest_tag)
    } else {
        increment_patch_and_add_testing(latest_tag)
    }
}

fn increment_testing_number(version: &str) -> Result<String> {
    let caps = TESTING_SUFFIX_RE
        .captures(version)
        .ok_or_else(|| Error::Format(format!("invalid testing version format: {}", version)))?;

    let prefix = &caps[1];
    let number: u64 = caps[2]
        .parse()
        .map_err(|_| Error::Format(format!("testing number out of range: {}", version)))?;
    let next = number
        .checked_add(1)
        .ok_or_else(|| Error::Format(format!("testing number out of range: {}", version)))?;

    Ok(format!("{}{}", prefix, next))
}

fn increment_patch_and_add_testing(version: &str) -> Result<String> {
    let caps = LEADING_TRIPLE_RE
        .captures(version)
        .ok_or_else(|| Error::Format(format!("invalid semver format: {}", version)))?;

    let patch: u64 = caps[3]
        .parse()
        .map_err(|_| Error::Format(format!("patch version out of range: {}", version)))?;
    let next = patch
        .checked_add(1)
        .ok_or_else(|| Error::Format(format!("patch version out of range: {}", version)))?;

    Ok(format!("{}.{}.{}-testing.1", &caps[1], &caps[2], next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_patterns_compile() {
        assert!(SEMVER_RE.is_match("1.2.3"));
        assert!(TESTING_SUFFIX_RE.is_match("1.2.3-testing.4"));
        assert!(LEADING_TRIPLE_RE.is_match("1.2.3-rc.1"));
    }

    #[test]
    fn test_valid_versions() {
        for version in [
            "1.2.3",
            "0.0.0",
            "1.2.3-testing.1",
            "1.2.3+build.5",
            "1.2.3-alpha.1+build.5",
            "10.20.30-rc-1",
        ] {
            assert!(is_valid_version(version), "{} should be valid", version);
        }
    }

    #[test]
    fn test_invalid_versions() {
        for version in ["1.2", "v1.2.3", "1.2.3-", "01.2.3", "1.2.3-01", "1.2.3+", ""] {
            assert!(!is_valid_version(version), "{} should be invalid", version);
        }
    }

    #[test]
    fn test_next_from_stable() {
        assert_eq!(next_testing_version("1.0.0", false).unwrap(), "1.0.1-testing.1");
        assert_eq!(next_testing_version("2.7.19", false).unwrap(), "2.7.20-testing.1");
    }

    #[test]
    fn test_next_from_testing_is_numeric() {
        assert_eq!(
            next_testing_version("1.0.1-testing.1", true).unwrap(),
            "1.0.1-testing.2"
        );
        assert_eq!(
            next_testing_version("1.0.1-testing.9", true).unwrap(),
            "1.0.1-testing.10"
        );
    }

    #[test]
    fn test_prerelease_without_testing_suffix_fails() {
        let err = next_testing_version("1.0.1-rc.1", true).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_stable_without_triple_fails() {
        let err = next_testing_version("release-one", false).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_prerelease_name() {
        assert!(is_prerelease_name("1.0.0-testing.1"));
        assert!(!is_prerelease_name("1.0.0"));
    }
}
