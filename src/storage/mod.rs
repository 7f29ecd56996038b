//! Client-local storage
//!
//! Small filesystem abstraction used for the persisted auth token and the
//! client config. Paths are relative to a base directory, normally the
//! per-user config directory (`<config_dir>/office-builder`).

pub mod local;

pub use local::LocalStorage;

use thiserror::Error;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "office-builder";

/// Storage error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// File or directory not found
    #[error("not found: {0}")]
    NotFound(String),
    /// Permission denied
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::Io(e.to_string()),
        }
    }
}

/// Storage rooted at `<config_dir>/office-builder`, falling back to `./office-builder`
pub fn user_storage() -> LocalStorage {
    let base = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR_NAME);
    LocalStorage::with_base_dir(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let nf = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(StorageError::from(nf), StorageError::NotFound(_)));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(StorageError::from(denied), StorageError::PermissionDenied(_)));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(matches!(StorageError::from(other), StorageError::Io(_)));
    }

    #[test]
    fn test_user_storage_dir_name() {
        let storage = user_storage();
        assert!(storage.base_dir().ends_with(APP_DIR_NAME));
    }
}
