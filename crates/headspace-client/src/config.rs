//! Client configuration.
//!
//! Loads the client configuration from `~/.config/headspace/config.toml`
//! with environment variable fallback for the base URL and anti-forgery
//! token (HEADSPACE_BASE_URL, HEADSPACE_CSRF_TOKEN).

use std::env;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use headspace_core::HeadspaceError;
use serde::{Deserialize, Serialize};

use crate::paths::HeadspacePaths;

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

/// Retry policy for state-changing requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retries after the initial attempt (so 3 means 4 attempts total).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Configuration for the Headspace backend client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://127.0.0.1:5000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Anti-forgery token attached to state-changing requests.
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default config file, then applies
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Self, HeadspaceError> {
        let path = HeadspacePaths::config_file()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from an explicit path (no environment overrides).
    pub fn load_from(path: &Path) -> Result<Self, HeadspaceError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| HeadspaceError::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = env::var("HEADSPACE_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(token) = env::var("HEADSPACE_CSRF_TOKEN") {
            self.csrf_token = Some(token);
        }
    }
}

/// Configuration service that loads and caches the client configuration.
///
/// The configuration is loaded lazily on first access and cached to avoid
/// repeated file I/O; `invalidate_cache` forces a reload.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the client configuration, loading from file if not cached.
    /// Load failures fall back to the defaults.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = ClientConfig::load().unwrap_or_default();

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }
}
