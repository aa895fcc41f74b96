// Rust guideline compliant 2026-10-15

//! Unit tests for error types and messages.
//!
//! These tests validate error formatting, context preservation and the
//! "nothing to release" distinction.

use modrel_core::{Error, HostError};
use std::error::Error as _;

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = Error::Io(io_err);
    assert!(error.to_string().contains("IO error"));
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
        .expect_err("Should fail to parse invalid JSON");
    let error = Error::Json(json_err);
    assert!(error.to_string().contains("JSON error"));
}

#[test]
fn test_naming_convention_formatting() {
    let error = Error::NamingConvention {
        repo: "NethServer/mail".to_string(),
        prefix: "ns8-".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid module name: NethServer/mail (must match owner/ns8-*)"
    );
}

#[test]
fn test_not_ancestor_formatting() {
    let error = Error::NotAncestor {
        sha: "abc123".to_string(),
        branch: "main".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("abc123"));
    assert!(msg.contains("main"));
}

#[test]
fn test_transport_preserves_source() {
    let error = Error::transport("list releases", HostError::new("HTTP 502"));
    assert_eq!(error.to_string(), "Failed to list releases: HTTP 502");
    let source = error.source().expect("transport error should have a source");
    assert_eq!(source.to_string(), "HTTP 502");
}

#[test]
fn test_repository_not_found_preserves_source() {
    let error = Error::RepositoryNotFound {
        repo: "acme/ns8-x".to_string(),
        source: HostError::new("HTTP 404"),
    };
    assert!(error.to_string().contains("acme/ns8-x"));
    assert!(error.source().is_some());
}

#[test]
fn test_nothing_to_release_is_distinguishable() {
    let terminal = Error::NothingToRelease {
        tag: "1.0.0".to_string(),
        branch: "main".to_string(),
    };
    assert!(terminal.is_nothing_to_release());
    assert!(terminal.to_string().contains("nothing to release"));

    let failure = Error::NoRelease("acme/ns8-x".to_string());
    assert!(!failure.is_nothing_to_release());
}

#[test]
fn test_empty_range_formatting() {
    let error = Error::EmptyRange {
        start: "1.0.0".to_string(),
        end: "main".to_string(),
    };
    assert_eq!(error.to_string(), "No commits found between 1.0.0 and main");
}

#[test]
fn test_host_error_message() {
    let error = HostError::new("boom");
    assert_eq!(error.message(), "boom");
    assert_eq!(error.to_string(), "boom");
}
