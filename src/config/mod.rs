//! Configuration management for pubapi
//!
//! The config file is optional. Missing files resolve to defaults, and CLI
//! flags or environment variables override whatever the file sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default catalog backend (Firebase realtime database)
pub const DEFAULT_API_HOST: &str =
    "https://json-rest-api-79fe3-default-rtdb.europe-west1.firebasedatabase.app";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Directory holding the entry cache database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Link browser settings
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Settings for the link browser session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Seconds before a page load is considered finished regardless of progress
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            load_timeout_secs: default_load_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_load_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Get the default config file path (~/.pubapi/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".pubapi").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path, falling back to defaults
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Effective API host: explicit override, then config file, then the default backend
    pub fn api_host(&self, host_override: Option<&str>) -> String {
        host_override
            .map(str::to_string)
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Effective cache directory: explicit override, then config file.
    /// `None` means the platform default.
    pub fn cache_dir(&self, dir_override: Option<&Path>) -> Option<PathBuf> {
        dir_override
            .map(Path::to_path_buf)
            .or_else(|| self.cache_dir.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.browser.load_timeout_secs)
    }

    /// Reject values that would make the client unusable
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".into()).into());
        }
        if self.browser.load_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "browser.load_timeout_secs must be greater than 0".into(),
            )
            .into());
        }
        if let Some(ref host) = self.api_host
            && !(host.starts_with("http://") || host.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "api_host must start with http:// or https://, got '{}'",
                host
            ))
            .into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: None,
            cache_dir: None,
            timeout_secs: default_timeout_secs(),
            preferences: Preferences::default(),
            browser: BrowserConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.yaml")).unwrap();

        assert!(config.api_host.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.browser.load_timeout_secs, 5);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_host: http://localhost:9000/\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_host(None), "http://localhost:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.browser.load_timeout_secs, 5);
    }

    #[test]
    fn test_api_host_precedence() {
        let config = Config {
            api_host: Some("http://from-file".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_host(Some("http://from-flag")), "http://from-flag");
        assert_eq!(config.api_host(None), "http://from-file");
        assert_eq!(Config::default().api_host(None), DEFAULT_API_HOST);
    }

    #[test]
    fn test_invalid_host_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_host: ftp://example.com\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_cache_dir_precedence() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/from/file")),
            ..Config::default()
        };
        assert_eq!(
            config.cache_dir(Some(Path::new("/from/flag"))),
            Some(PathBuf::from("/from/flag"))
        );
        assert_eq!(config.cache_dir(None), Some(PathBuf::from("/from/file")));
        assert_eq!(Config::default().cache_dir(None), None);
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "timeout_secs: 10\npreferences:\n  format: json\nbrowser:\n  load_timeout_secs: 2\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.load_timeout(), Duration::from_secs(2));
        assert_eq!(config.preferences.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timeout_secs: 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
