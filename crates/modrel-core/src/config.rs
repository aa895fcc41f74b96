// Rust guideline compliant 2026-10-12

//! Configuration management for modrel.

use crate::links::DEFAULT_WEB_HOST;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the configuration directory.
pub const CONFIG_FILE_NAME: &str = "modrel.toml";

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON envelopes.
    Json,
}

/// Configuration for modrel behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repository holding the issues that pull requests link to (`owner/name`).
    #[serde(default = "default_issues_repo")]
    pub issues_repo: String,

    /// Prefix every module repository name must start with.
    #[serde(default = "default_module_prefix")]
    pub module_prefix: String,

    /// Web host used for links and issue URL matching.
    #[serde(default = "default_web_host")]
    pub web_host: String,

    /// Maximum number of releases fetched for history queries.
    #[serde(default = "default_release_list_limit")]
    pub release_list_limit: usize,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_issues_repo() -> String {
    "NethServer/dev".to_string()
}

fn default_module_prefix() -> String {
    "ns8-".to_string()
}

fn default_web_host() -> String {
    DEFAULT_WEB_HOST.to_string()
}

fn default_release_list_limit() -> usize {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issues_repo: default_issues_repo(),
            module_prefix: default_module_prefix(),
            web_host: default_web_host(),
            release_list_limit: default_release_list_limit(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a directory and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<dir>/modrel.toml`
    /// 3. Environment variables with `MODREL_` prefix
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory that may contain `modrel.toml`
    ///
    /// # Returns
    ///
    /// A Config struct with values from file and environment variables applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let base = if config_path.exists() {
            Self::read_file(&config_path)?
        } else {
            Self::default()
        };
        base.finish()
    }

    /// Loads configuration from an explicit file, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or validation fails.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::read_file(path)?.finish()
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    fn finish(mut self) -> Result<Self> {
        self.apply_env_overrides()?;
        self.validate()?;
        Ok(self)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MODREL_ISSUES_REPO` - Issues repository (owner/name)
    /// - `MODREL_MODULE_PREFIX` - Module name prefix
    /// - `MODREL_WEB_HOST` - Web host for links
    /// - `MODREL_RELEASE_LIST_LIMIT` - Release history limit
    /// - `MODREL_OUTPUT_FORMAT` - Output format (text/json)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MODREL_ISSUES_REPO") {
            self.issues_repo = val;
        }

        if let Ok(val) = std::env::var("MODREL_MODULE_PREFIX") {
            self.module_prefix = val;
        }

        if let Ok(val) = std::env::var("MODREL_WEB_HOST") {
            self.web_host = val;
        }

        if let Ok(val) = std::env::var("MODREL_RELEASE_LIST_LIMIT") {
            self.release_list_limit = val.parse().map_err(|_| {
                Error::InvalidConfig("MODREL_RELEASE_LIST_LIMIT must be a positive number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("MODREL_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(Error::InvalidConfig(
                        "MODREL_OUTPUT_FORMAT must be text or json".to_string(),
                    ))
                }
            };
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - issues_repo is not of the form owner/name
    /// - module_prefix or web_host is empty
    /// - release_list_limit is zero
    pub fn validate(&self) -> Result<()> {
        let parts: Vec<&str> = self.issues_repo.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|part| part.is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "issues_repo must be owner/name, got {}",
                self.issues_repo
            )));
        }

        if self.module_prefix.is_empty() {
            return Err(Error::InvalidConfig(
                "module_prefix must not be empty".to_string(),
            ));
        }

        if self.web_host.is_empty() {
            return Err(Error::InvalidConfig("web_host must not be empty".to_string()));
        }

        if self.release_list_limit == 0 {
            return Err(Error::InvalidConfig(
                "release_list_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Environment variables are process-wide; serialize the tests touching them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        std::env::remove_var("MODREL_ISSUES_REPO");
        std::env::remove_var("MODREL_MODULE_PREFIX");
        std::env::remove_var("MODREL_WEB_HOST");
        std::env::remove_var("MODREL_RELEASE_LIST_LIMIT");
        std::env::remove_var("MODREL_OUTPUT_FORMAT");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.issues_repo, "NethServer/dev");
        assert_eq!(config.module_prefix, "ns8-");
        assert_eq!(config.web_host, "github.com");
        assert_eq!(config.release_list_limit, 1000);
        assert_eq!(config.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_config_load_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
issues_repo = "acme/tracker"
module_prefix = "mod-"
web_host = "git.example.com"
release_list_limit = 50
output_format = "json"
"#;
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.issues_repo, "acme/tracker");
        assert_eq!(config.module_prefix, "mod-");
        assert_eq!(config.web_host, "git.example.com");
        assert_eq!(config.release_list_limit, 50);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "module_prefix = \"mod-\"",
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.module_prefix, "mod-");
        assert_eq!(config.issues_repo, "NethServer/dev");
    }

    #[test]
    fn test_config_validation_invalid_issues_repo() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "issues_repo = \"no-slash\"",
        )
        .unwrap();

        let result = Config::load(temp_dir.path());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_config_validation_zero_limit() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "release_list_limit = 0",
        )
        .unwrap();

        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_invalid_toml() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "issues_repo = ").unwrap();

        assert!(matches!(
            Config::load(temp_dir.path()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_env_override_issues_repo() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("MODREL_ISSUES_REPO", "acme/issues");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.issues_repo, "acme/issues");

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_limit() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("MODREL_RELEASE_LIST_LIMIT", "lots");
        let result = Config::load(temp_dir.path());
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_format() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("MODREL_OUTPUT_FORMAT", "yaml");
        let result = Config::load(temp_dir.path());
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "web_host = \"git.example.com\"",
        )
        .unwrap();

        std::env::set_var("MODREL_WEB_HOST", "code.example.org");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.web_host, "code.example.org");

        clear_all_env_vars();
    }

    #[test]
    fn test_config_load_file_reads_every_field() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "issues_repo = \"acme/tracker\"\nmodule_prefix = \"mod-\"\n\
             web_host = \"git.example.com\"\nrelease_list_limit = 25\n\
             output_format = \"json\"\n",
        )
        .unwrap();

        let expected = Config {
            issues_repo: "acme/tracker".to_string(),
            module_prefix: "mod-".to_string(),
            web_host: "git.example.com".to_string(),
            release_list_limit: 25,
            output_format: OutputFormat::Json,
        };
        assert_eq!(Config::load_file(&path).unwrap(), expected);
    }
}
