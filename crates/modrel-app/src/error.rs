// Rust guideline compliant 2026-10-16

//! Error handling for modrel workflows.

use modrel_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A release name or tag is not a valid version.
    InvalidVersion,
    /// The repository could not be determined.
    AmbiguousRepo,
    /// The repository identifier is malformed or breaks the naming convention.
    InvalidRepository,
    /// A repository or release was not found.
    NotFound,
    /// The commit is not on the default branch.
    NotAncestor,
    /// The commit range is empty.
    EmptyRange,
    /// No pull request was found in the commit range.
    NoPullRequests,
    /// The latest release already points at the branch head.
    NothingToRelease,
    /// No release name was given and none can be derived.
    MissingReleaseName,
    /// Configuration could not be loaded.
    ConfigError,
    /// The hosting platform failed an operation.
    HostError,
    /// The request included invalid inputs.
    InvalidInput,
    /// IO failure.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A stable release was requested without a name.
    #[error("Please provide the release name using the --release-name flag")]
    MissingReleaseName,

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::MissingReleaseName => ErrorCode::MissingReleaseName,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::Format(_) => ErrorCode::InvalidVersion,
                CoreError::AmbiguousRepo => ErrorCode::AmbiguousRepo,
                CoreError::NamingConvention { .. } | CoreError::InvalidRepoId(_) => {
                    ErrorCode::InvalidRepository
                }
                CoreError::RepositoryNotFound { .. }
                | CoreError::NoRelease(_)
                | CoreError::ReleaseNotFound(_)
                | CoreError::NoPreviousRelease(_) => ErrorCode::NotFound,
                CoreError::NotAncestor { .. } => ErrorCode::NotAncestor,
                CoreError::EmptyRange { .. } => ErrorCode::EmptyRange,
                CoreError::NoPullRequests { .. } => ErrorCode::NoPullRequests,
                CoreError::NothingToRelease { .. } => ErrorCode::NothingToRelease,
                CoreError::InvalidConfig(_) => ErrorCode::ConfigError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
                CoreError::Transport { .. } => ErrorCode::HostError,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        let AppError::Core(core) = self else {
            return None;
        };
        match core {
            CoreError::NamingConvention { repo, prefix } => Some(serde_json::json!({
                "repo": repo,
                "prefix": prefix,
            })),
            CoreError::RepositoryNotFound { repo, .. } => Some(serde_json::json!({
                "repo": repo,
            })),
            CoreError::NotAncestor { sha, branch } => Some(serde_json::json!({
                "sha": sha,
                "branch": branch,
            })),
            CoreError::EmptyRange { start, end } | CoreError::NoPullRequests { start, end } => {
                Some(serde_json::json!({
                    "start": start,
                    "end": end,
                }))
            }
            CoreError::NothingToRelease { tag, branch } => Some(serde_json::json!({
                "tag": tag,
                "branch": branch,
            })),
            CoreError::Transport { operation, .. } => Some(serde_json::json!({
                "operation": operation,
            })),
            _ => None,
        }
    }

    /// Returns `true` for the "nothing to release" terminal state.
    #[must_use]
    pub fn is_nothing_to_release(&self) -> bool {
        matches!(self, AppError::Core(core) if core.is_nothing_to_release())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modrel_core::HostError;

    #[test]
    fn test_codes() {
        assert_eq!(
            AppError::MissingReleaseName.code(),
            ErrorCode::MissingReleaseName
        );
        assert_eq!(
            AppError::from(CoreError::Format("x".to_string())).code(),
            ErrorCode::InvalidVersion
        );
        assert_eq!(
            AppError::from(CoreError::transport("list releases", HostError::new("boom"))).code(),
            ErrorCode::HostError
        );
    }

    #[test]
    fn test_nothing_to_release_details() {
        let error = AppError::from(CoreError::NothingToRelease {
            tag: "1.0.0".to_string(),
            branch: "main".to_string(),
        });
        assert!(error.is_nothing_to_release());
        assert_eq!(
            error.details(),
            Some(serde_json::json!({"tag": "1.0.0", "branch": "main"}))
        );
    }

    #[test]
    fn test_code_serializes_snake_case() {
        let value = serde_json::to_value(ErrorCode::NoPullRequests).unwrap();
        assert_eq!(value, serde_json::json!("no_pull_requests"));
    }
}
