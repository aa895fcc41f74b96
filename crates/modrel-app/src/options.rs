// Rust guideline compliant 2026-10-16

//! Per-run parameters of the workflows.
//!
//! Every workflow receives its settings explicitly; nothing is read from
//! ambient state.

use crate::error::Result;
use modrel_core::{resolve_repository, Config, HostingApi, Repository, WebLinks};

/// Settings shared by every workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Module repository (`owner/name`); `None` uses the working-directory context.
    pub repo: Option<String>,
    /// Issues repository (`owner/name`).
    pub issues_repo: String,
    /// Required module name prefix.
    pub module_prefix: String,
    /// Web host for issue URLs.
    pub web_host: String,
    /// Maximum number of releases inspected by history queries.
    pub release_list_limit: usize,
}

impl ModuleOptions {
    /// Builds options from configuration and an optional explicit repository.
    #[must_use]
    pub fn from_config(config: &Config, repo: Option<String>) -> Self {
        Self {
            repo,
            issues_repo: config.issues_repo.clone(),
            module_prefix: config.module_prefix.clone(),
            web_host: config.web_host.clone(),
            release_list_limit: config.release_list_limit,
        }
    }

    /// Returns the link builder for the configured web host.
    #[must_use]
    pub fn links(&self) -> WebLinks {
        WebLinks::new(self.web_host.clone())
    }

    /// Resolves and validates the module repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be determined, breaks the
    /// naming convention, or does not exist.
    pub fn resolve_repository(&self, host: &dyn HostingApi) -> Result<Repository> {
        Ok(resolve_repository(
            host,
            self.repo.as_deref(),
            &self.module_prefix,
        )?)
    }
}

/// Options of the `create` workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Commit to release from; `None` uses the default-branch tip.
    pub release_refs: Option<String>,
    /// Release name; derived for testing releases when absent.
    pub release_name: Option<String>,
    /// Create a testing pre-release.
    pub testing: bool,
    /// Create the release as draft.
    pub draft: bool,
    /// Append the linked issues section to the release notes.
    pub with_linked_issues: bool,
}

/// Options of the `comment` workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentOptions {
    /// Release to announce; `None` uses the latest release.
    pub release: Option<String>,
}

/// Options of the `clean` workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Stable release whose pre-releases are removed; `None` uses the latest stable.
    pub release_name: Option<String>,
    /// List the pre-releases without deleting them.
    pub dry_run: bool,
}

/// Treats empty strings as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = Config::default();
        let options = ModuleOptions::from_config(&config, Some("acme/ns8-app".to_string()));
        assert_eq!(options.issues_repo, "NethServer/dev");
        assert_eq!(options.module_prefix, "ns8-");
        assert_eq!(options.links().host(), "github.com");
        assert_eq!(options.repo.as_deref(), Some("acme/ns8-app"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("1.0.0")), Some("1.0.0"));
        assert_eq!(non_empty(None), None);
    }
}
