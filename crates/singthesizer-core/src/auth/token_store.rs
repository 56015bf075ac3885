//! Persistent storage for the single credential token.
//!
//! The token is opaque: stores never inspect or validate it. Three backends
//! share the `TokenStore` trait:
//!
//! - `FileTokenStore`: a small JSON file in the config directory
//! - `KeyringTokenStore`: the OS keychain
//! - `MemoryTokenStore`: process-local, nothing survives a restart

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use keyring::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Keychain service name
const SERVICE_NAME: &str = "singthesizer";

/// Fixed key the token is stored under, in every backend.
pub const TOKEN_KEY: &str = "token";

/// Token file name in the config directory
const TOKEN_FILE: &str = "token.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Failed to access token file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode token file: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when no credential is stored.
    fn get(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    fn set(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the token. Backend failures are logged, never returned.
    fn clear(&self);
}

/// Shared handle used by the API client and the session.
pub type SharedTokenStore = Arc<dyn TokenStore>;

// ============================================================================
// Memory
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot().clone()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}

// ============================================================================
// File
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let path = self.token_path();
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<TokenFile>(&contents) {
            Ok(file) if !file.token.is_empty() => Some(file.token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, path = ?path, "Ignoring unreadable token file");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(&TokenFile {
            token: token.to_string(),
        })?;
        std::fs::write(self.token_path(), contents)?;
        debug!("Token written to file store");
        Ok(())
    }

    fn clear(&self) {
        let path = self.token_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, path = ?path, "Failed to remove token file");
            }
        }
    }
}

// ============================================================================
// Keyring
// ============================================================================

pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry() -> Result<Entry, StoreError> {
        Ok(Entry::new(SERVICE_NAME, TOKEN_KEY)?)
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        match Self::entry().and_then(|entry| Ok(entry.get_password()?)) {
            Ok(token) => Some(token),
            Err(StoreError::Keyring(keyring::Error::NoEntry)) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read token from keychain");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        Self::entry()?.set_password(token)?;
        Ok(())
    }

    fn clear(&self) {
        match Self::entry().and_then(|entry| Ok(entry.delete_credential()?)) {
            Ok(()) | Err(StoreError::Keyring(keyring::Error::NoEntry)) => {}
            Err(e) => warn!(error = %e, "Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_overwrites() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().as_deref(), Some("second"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_memory_store_clear_when_empty() {
        let store = MemoryTokenStore::new();
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested"));

        assert_eq!(store.get(), None);
        store.set("abc123").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc123"));

        // A second handle on the same directory sees the persisted value
        let reopened = FileTokenStore::new(dir.path().join("nested"));
        assert_eq!(reopened.get().as_deref(), Some("abc123"));

        store.clear();
        assert_eq!(reopened.get(), None);
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOKEN_FILE), "not json").unwrap();

        let store = FileTokenStore::new(dir.path().to_path_buf());
        assert_eq!(store.get(), None);
    }
}
