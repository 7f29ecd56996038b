//! Authentication
//!
//! - `TokenStore`: the bearer token persisted in client-local storage
//! - `login`: login/register screen state and its requests

pub mod login;

pub use login::{LoginAction, LoginScreen};

use crate::api::token_preview;
use crate::storage::{LocalStorage, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Token file inside the storage directory
pub const TOKEN_FILE: &str = "auth_token.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    auth_token: String,
}

/// Persisted auth token
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: LocalStorage,
}

impl TokenStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Load the stored token. Missing or unreadable files yield `None`.
    pub fn load(&self) -> Option<String> {
        let contents = match self.storage.read_string(TOKEN_FILE) {
            Ok(contents) => contents,
            Err(StorageError::NotFound(_)) => return None,
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) if !stored.auth_token.is_empty() => {
                info!("Auth token restored ({})", token_preview(&stored.auth_token));
                Some(stored.auth_token)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring malformed token file: {}", e);
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> Result<(), StorageError> {
        let stored = StoredToken {
            auth_token: token.to_string(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| StorageError::Serde(e.to_string()))?;
        self.storage.write_string(TOKEN_FILE, &json)
    }

    /// Sign out - delete the stored token
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.delete(TOKEN_FILE)?;
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TokenStore) {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(LocalStorage::with_base_dir(dir.path()));
        (dir, store)
    }

    #[test]
    fn test_save_load_clear() {
        let (_dir, store) = store();
        assert_eq!(store.load(), None);

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));

        store.save("second").unwrap();
        assert_eq!(store.load().as_deref(), Some("second"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let (dir, store) = store();
        std::fs::write(dir.path().join(TOKEN_FILE), "not json").unwrap();
        assert_eq!(store.load(), None);

        std::fs::write(dir.path().join(TOKEN_FILE), r#"{"auth_token":""}"#).unwrap();
        assert_eq!(store.load(), None);
    }
}
