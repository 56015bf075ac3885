//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend URL, where the token is stored, and the last
//! used username.
//!
//! Configuration is stored at `~/.config/singthesizer/config.json`.
//! `SINGTHESIZER_API_URL` and `SINGTHESIZER_USERNAME` override the file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::client::DEFAULT_TIMEOUT_SECS;
use crate::api::ApiClient;
use crate::auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, SharedTokenStore};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "singthesizer";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend used when no URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

const API_URL_ENV: &str = "SINGTHESIZER_API_URL";
const USERNAME_ENV: &str = "SINGTHESIZER_USERNAME";

/// Where the credential token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub token_backend: TokenBackend,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            token_backend: TokenBackend::default(),
            request_timeout_secs: default_timeout(),
            last_username: None,
        }
    }
}

impl Config {
    /// Load the config file (defaults if absent) and apply env overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.apply_env();
        debug!(api_base_url = %config.api_base_url, backend = ?config.token_backend, "Config loaded");
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(url) = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(username) = std::env::var(USERNAME_ENV).ok().filter(|v| !v.trim().is_empty()) {
            self.last_username = Some(username);
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME))
    }

    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Build the token store selected by `token_backend`.
    pub fn token_store(&self) -> Result<SharedTokenStore> {
        let store: SharedTokenStore = match self.token_backend {
            TokenBackend::File => Arc::new(FileTokenStore::new(Self::config_dir()?)),
            TokenBackend::Keyring => Arc::new(KeyringTokenStore),
            TokenBackend::Memory => Arc::new(MemoryTokenStore::new()),
        };
        Ok(store)
    }

    /// Build an API client for the configured backend over `tokens`.
    pub fn api_client(&self, tokens: SharedTokenStore) -> Result<ApiClient> {
        ApiClient::with_timeout(
            &self.api_base_url,
            tokens,
            Duration::from_secs(self.request_timeout_secs),
        )
        .context("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"last_username": "alice"}"#).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.token_backend, TokenBackend::File);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.last_username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_token_backend_names() {
        let config: Config = serde_json::from_str(r#"{"token_backend": "keyring"}"#).unwrap();
        assert_eq!(config.token_backend, TokenBackend::Keyring);
        assert_eq!(
            serde_json::to_string(&TokenBackend::Memory).unwrap(),
            r#""memory""#
        );
    }

    #[test]
    fn test_memory_backend_starts_empty() {
        let config = Config {
            token_backend: TokenBackend::Memory,
            ..Config::default()
        };
        let store = config.token_store().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_dirs_are_app_scoped() {
        // Both are resolvable without a loaded config
        if let Ok(dir) = Config::cache_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
        if let Ok(dir) = Config::config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
