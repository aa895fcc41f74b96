// Rust guideline compliant 2026-10-13

//! Web links to hosted entities.

/// Host name used when nothing else is configured.
pub const DEFAULT_WEB_HOST: &str = "github.com";

/// Builds browser URLs for a web host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLinks {
    host: String,
}

impl Default for WebLinks {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_HOST)
    }
}

impl WebLinks {
    /// Creates a link builder for the given host (e.g. `github.com`).
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Returns the web host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// URL of a pull request.
    #[must_use]
    pub fn pull_request(&self, repo: &str, number: u64) -> String {
        format!("https://{}/{}/pull/{}", self.host, repo, number)
    }

    /// URL of a commit.
    #[must_use]
    pub fn commit(&self, repo: &str, sha: &str) -> String {
        format!("https://{}/{}/commit/{}", self.host, repo, sha)
    }

    /// URL of an issue.
    #[must_use]
    pub fn issue(&self, repo: &str, number: u64) -> String {
        format!("https://{}/{}/issues/{}", self.host, repo, number)
    }

    /// URL of a release page.
    #[must_use]
    pub fn release(&self, repo: &str, tag: &str) -> String {
        format!("https://{}/{}/releases/tag/{}", self.host, repo, tag)
    }
}
