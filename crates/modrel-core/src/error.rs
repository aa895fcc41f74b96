// Rust guideline compliant 2026-10-12

//! Error types for the modrel core library.

use thiserror::Error;

/// Result type alias for modrel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type returned by `HostingApi` implementations.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Opaque failure reported by the hosting platform collaborator.
///
/// The core never inspects it beyond "the operation failed"; it is wrapped
/// into [`Error::Transport`] together with the failing operation's name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    /// Creates a host error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the raw message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error types for modrel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A version string does not have the expected shape.
    #[error("Invalid version format: {0}")]
    Format(String),

    /// No repository was given and none could be inferred from the working directory.
    #[error("Could not determine the repository; provide one explicitly")]
    AmbiguousRepo,

    /// The repository does not follow the module naming convention.
    #[error("Invalid module name: {repo} (must match owner/{prefix}*)")]
    NamingConvention {
        /// Offending repository identifier.
        repo: String,
        /// Required module prefix.
        prefix: String,
    },

    /// The repository does not exist or is not accessible.
    #[error("Invalid repo: {repo} ({source})")]
    RepositoryNotFound {
        /// Repository identifier that failed to resolve.
        repo: String,
        /// Underlying lookup failure.
        #[source]
        source: HostError,
    },

    /// The commit is not reachable from the default branch.
    #[error("The commit {sha} is not on the default branch: {branch}")]
    NotAncestor {
        /// Commit that was checked.
        sha: String,
        /// Default branch name.
        branch: String,
    },

    /// The commit range contains no commits.
    #[error("No commits found between {start} and {end}")]
    EmptyRange {
        /// Range start ref.
        start: String,
        /// Range end ref.
        end: String,
    },

    /// No pull request is associated with any commit of the range.
    #[error("No pull requests found for the commits between {start} and {end}")]
    NoPullRequests {
        /// Range start ref.
        start: String,
        /// Range end ref.
        end: String,
    },

    /// The repository has no (matching) release.
    #[error("No releases found in {0}")]
    NoRelease(String),

    /// The latest release already points at the default branch head.
    ///
    /// This is a terminal state rather than a failure; callers should report it as success.
    #[error("The latest release tag {tag} is the HEAD of the {branch} branch, there is nothing to release")]
    NothingToRelease {
        /// Latest release tag.
        tag: String,
        /// Default branch name.
        branch: String,
    },

    /// A named release is not present in the release listing.
    #[error("Release not found: {0}")]
    ReleaseNotFound(String),

    /// There is no older release to compare against.
    #[error("No previous release found before {0}")]
    NoPreviousRelease(String),

    /// A repository identifier is not of the form `owner/name`.
    #[error("Invalid repository identifier: {0} (expected owner/name)")]
    InvalidRepoId(String),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The hosting platform rejected or failed an operation.
    #[error("Failed to {operation}: {source}")]
    Transport {
        /// Human-readable name of the failing operation.
        operation: String,
        /// Underlying platform failure.
        #[source]
        source: HostError,
    },
}

impl Error {
    /// Wraps a host failure with the failing operation's context.
    pub fn transport(operation: impl Into<String>, source: HostError) -> Self {
        Error::Transport {
            operation: operation.into(),
            source,
        }
    }

    /// Returns `true` for the "nothing to release" terminal state.
    #[must_use]
    pub fn is_nothing_to_release(&self) -> bool {
        matches!(self, Error::NothingToRelease { .. })
    }
}
