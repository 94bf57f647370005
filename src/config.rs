//! Configuration types for tidytuesday

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable naming a JSON configuration file
pub const CONFIG_ENV: &str = "TIDYTUESDAY_CONFIG";

/// Main configuration for a [`TidyTuesday`](crate::TidyTuesday) session
///
/// Every field has a default pointing at the public `rfordatascience/tidytuesday`
/// repository, so `Config::default()` works out of the box. The three base URLs
/// exist so tests (and mirrors) can point every host at a single server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Repository API host (default: "https://api.github.com")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Rendered page host used for the year listing (default: "https://github.com")
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Raw content host used for READMEs (default: "https://raw.githubusercontent.com")
    #[serde(default = "default_raw_url")]
    pub raw_url: String,

    /// Repository owner (default: "rfordatascience")
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name (default: "tidytuesday")
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Directory inside the repository holding the year folders (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Branches tried in order for rendered and raw documents (default: main, master)
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (None = wait indefinitely)
    #[serde(default, with = "optional_duration_serde")]
    pub request_timeout: Option<Duration>,

    /// Remaining API calls required before fetching a release (default: 5)
    #[serde(default = "default_min_release_budget")]
    pub min_release_budget: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            site_url: default_site_url(),
            raw_url: default_raw_url(),
            owner: default_owner(),
            repo: default_repo(),
            data_dir: default_data_dir(),
            branches: default_branches(),
            user_agent: default_user_agent(),
            request_timeout: None,
            min_release_budget: default_min_release_budget(),
        }
    }
}

impl Config {
    /// Point all three hosts at one base URL (mirrors, mock servers)
    pub fn with_base_url(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            api_url: base.clone(),
            site_url: base.clone(),
            raw_url: base,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("invalid config file {}: {}", path.display(), e),
            key: None,
        })?;
        Ok(config)
    }

    /// Resolve the effective configuration
    ///
    /// Order: explicit file, else the file named by `TIDYTUESDAY_CONFIG`, else
    /// defaults; then `TIDYTUESDAY_*` environment overrides; then validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV);
        let mut config = match path.or(env_path.as_deref().map(Path::new)) {
            Some(p) => Self::from_json_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `TIDYTUESDAY_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut String); 5] = [
            ("TIDYTUESDAY_API_URL", &mut self.api_url),
            ("TIDYTUESDAY_SITE_URL", &mut self.site_url),
            ("TIDYTUESDAY_RAW_URL", &mut self.raw_url),
            ("TIDYTUESDAY_OWNER", &mut self.owner),
            ("TIDYTUESDAY_REPO", &mut self.repo),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
    }

    /// Check that the configuration can actually be used
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("api_url", &self.api_url),
            ("site_url", &self.site_url),
            ("raw_url", &self.raw_url),
        ] {
            Url::parse(value).map_err(|e| Error::Config {
                message: format!("{key} is not a valid URL ({value}): {e}"),
                key: Some(key.to_string()),
            })?;
        }
        if self.branches.is_empty() {
            return Err(Error::Config {
                message: "at least one branch is required".into(),
                key: Some("branches".into()),
            });
        }
        for (key, value) in [("owner", &self.owner), ("repo", &self.repo)] {
            if value.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("{key} must not be empty"),
                    key: Some(key.to_string()),
                });
            }
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_site_url() -> String {
    "https://github.com".to_string()
}

fn default_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_owner() -> String {
    "rfordatascience".to_string()
}

fn default_repo() -> String {
    "tidytuesday".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_user_agent() -> String {
    format!("tidytuesday/{}", env!("CARGO_PKG_VERSION"))
}

fn default_min_release_budget() -> u64 {
    5
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_point_at_public_repository() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.owner, "rfordatascience");
        assert_eq!(config.repo, "tidytuesday");
        assert_eq!(config.branches, vec!["main", "master"]);
        assert_eq!(config.min_release_budget, 5);
        assert!(config.request_timeout.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"owner": "someone", "request_timeout": 30}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.owner, "someone");
        assert_eq!(config.repo, "tidytuesday");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Config::from_json_file(&path);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_env_overrides_skip_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("TIDYTUESDAY_API_URL", "http://localhost:9000"),
            ("TIDYTUESDAY_OWNER", "   "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.owner, "rfordatascience");
    }

    #[test]
    fn test_validate_rejects_bad_url_and_empty_branches() {
        let config = Config {
            raw_url: "not a url".into(),
            ..Default::default()
        };
        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("raw_url")),
            other => panic!("expected config error, got {other:?}"),
        }

        let config = Config {
            branches: vec![],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_with_base_url_sets_every_host() {
        let config = Config::with_base_url("http://127.0.0.1:1234");
        assert_eq!(config.api_url, "http://127.0.0.1:1234");
        assert_eq!(config.site_url, "http://127.0.0.1:1234");
        assert_eq!(config.raw_url, "http://127.0.0.1:1234");
    }
}
