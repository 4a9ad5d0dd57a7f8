//! Configuration management for SwagCheck

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use swagcheck_core::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// swagger-ui reference repository settings
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Vulnerability catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Merge with environment variables (SWAGCHECK_ prefix)
    pub fn merge_env(mut self) -> Self {
        if let Ok(val) = std::env::var("SWAGCHECK_REPO") {
            self.repository.path = val;
        }
        if let Ok(val) = std::env::var("SWAGCHECK_GIT_SOURCE") {
            self.repository.remote = val;
        }
        if let Ok(val) = std::env::var("SWAGCHECK_SNYK_URL") {
            self.catalog.url = val;
        }
        if let Ok(val) = std::env::var("SWAGCHECK_HTTP_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.http.timeout_seconds = n;
            }
        }
        if let Ok(val) = std::env::var("SWAGCHECK_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("SWAGCHECK_LOG_FORMAT") {
            self.logging.format = val;
        }
        self
    }
}

/// Reference repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Local repository containing swagger-ui
    #[serde(default = "default_repo_path")]
    pub path: String,

    /// Git URL of swagger-ui (clone source, also validated against the
    /// local copy's remotes)
    #[serde(default = "default_repo_remote")]
    pub remote: String,

    /// Clone the repository when the local path is missing or empty
    #[serde(default = "default_true")]
    pub fetch: bool,

    /// Short-hash to version overrides for commits absent from the public
    /// history
    #[serde(default = "default_special_cases")]
    pub special_cases: HashMap<String, String>,
}

fn default_repo_path() -> String {
    String::from("./swagger-ui")
}

fn default_repo_remote() -> String {
    String::from("https://github.com/swagger-api/swagger-ui")
}

fn default_true() -> bool {
    true
}

fn default_special_cases() -> HashMap<String, String> {
    // For some reason these commits are not in the repository.
    HashMap::from([
        (String::from("a6656ced"), String::from("v3.17.1")),
        (String::from("7f92cd3c"), String::from("v3.7.0")),
    ])
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: default_repo_path(),
            remote: default_repo_remote(),
            fetch: true,
            special_cases: default_special_cases(),
        }
    }
}

/// Vulnerability catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of the page containing the swagger-ui vulnerability table
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Class of the span carrying the version-range text in the second
    /// table cell. The scraped page's markup has changed shape over time,
    /// so this is configuration rather than a constant.
    #[serde(default = "default_version_chip_class")]
    pub version_chip_class: String,
}

fn default_catalog_url() -> String {
    String::from("https://snyk.io/vuln/npm:swagger-ui")
}

fn default_version_chip_class() -> String {
    String::from("vue--chip vulnerable-versions__chip vue--chip--default")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            version_chip_class: default_version_chip_class(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("swagcheck/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            user_agent: default_user_agent(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [repository]
            path = "/srv/swagger-ui"
            fetch = false

            [catalog]
            url = "https://snyk.example.com/vuln/npm:swagger-ui"

            [http]
            timeout_seconds = 10

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.repository.path, "/srv/swagger-ui");
        assert!(!config.repository.fetch);
        assert_eq!(config.catalog.url, "https://snyk.example.com/vuln/npm:swagger-ui");
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repository.path, "./swagger-ui");
        assert!(config.repository.fetch);
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(
            config.repository.special_cases.get("a6656ced"),
            Some(&String::from("v3.17.1"))
        );
        assert_eq!(
            config.repository.special_cases.get("7f92cd3c"),
            Some(&String::from("v3.7.0"))
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.catalog.url, "https://snyk.io/vuln/npm:swagger-ui");
        assert!(config
            .catalog
            .version_chip_class
            .contains("vulnerable-versions__chip"));
    }
}
