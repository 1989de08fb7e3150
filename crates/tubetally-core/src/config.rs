//! Catalog access configuration.
//!
//! Handles loading and saving the settings used to reach the video catalog:
//! the API key, the API base URL, the request timeout and how many detail
//! batches may be in flight at once.
//!
//! Settings are read from `<config dir>/tubetally/config.json` when it
//! exists, and can be overridden from the environment
//! (`TUBETALLY_API_KEY`, `TUBETALLY_API_BASE_URL`).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default base URL of the YouTube Data API v3.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default timeout for a single catalog request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of detail batches in flight. One keeps requests strictly
/// sequential.
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 1;

/// Environment variable overriding [`CatalogConfig::api_key`].
pub const API_KEY_ENV: &str = "TUBETALLY_API_KEY";

/// Environment variable overriding [`CatalogConfig::base_url`].
pub const BASE_URL_ENV: &str = "TUBETALLY_API_BASE_URL";

/// Settings for talking to the video catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Opaque API key passed with every request.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the catalog API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum number of metadata batches requested concurrently.
    #[serde(default = "default_max_concurrent_batches")]
    pub max_concurrent_batches: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

const fn default_max_concurrent_batches() -> usize {
    DEFAULT_MAX_CONCURRENT_BATCHES
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
        }
    }
}

impl CatalogConfig {
    /// Create a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set the number of concurrent metadata batches.
    #[must_use]
    pub const fn with_max_concurrent_batches(mut self, batches: usize) -> Self {
        self.max_concurrent_batches = batches;
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Load configuration from the default location, falling back to
    /// defaults when no file exists, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        let config = if path.exists() {
            Self::load_from(&path)?
        } else {
            debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::FileSystem {
            path: path.to_path_buf(),
            message: format!("Failed to read config file: {e}"),
        })?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config file: {e}")))?;

        info!("Loaded config from {}", path.display());
        debug!(base_url = %config.base_url, "Catalog base URL");
        Ok(config)
    }

    /// Save configuration to a specific file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| Error::FileSystem {
                path: parent.to_path_buf(),
                message: format!("Failed to create config directory: {e}"),
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileSystem {
            path: path.to_path_buf(),
            message: format!("Failed to write config file: {e}"),
        })?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = non_blank(API_KEY_ENV) {
            debug!("Using API key from {API_KEY_ENV}");
            self.api_key = api_key;
        }
        if let Some(base_url) = non_blank(BASE_URL_ENV) {
            debug!(base_url = %base_url, "Using base URL from {BASE_URL_ENV}");
            self.base_url = base_url;
        }
        self
    }

    /// Check that the configuration can be used to reach the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::configuration(format!(
                "API key is missing; set it in the config file or via {API_KEY_ENV}"
            )));
        }

        let base = self.base_url.to_lowercase();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(Error::configuration(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::configuration(
                "Request timeout must be at least one second",
            ));
        }

        if self.max_concurrent_batches == 0 {
            return Err(Error::configuration(
                "Concurrent batch count must be at least one",
            ));
        }

        Ok(())
    }

    /// Get the path to the default config file.
    #[must_use]
    pub fn config_file_path() -> PathBuf {
        config_file_path()
    }
}

fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("tubetally")
        .join("config.json")
}
