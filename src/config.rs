//! Client configuration
//!
//! Loaded from `config.ron` in the user storage directory. Every field has a
//! default, so a missing file (or a missing field) falls back silently.
//! A handful of environment variables override the file.

use crate::storage::{LocalStorage, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the config inside the storage directory
pub const CONFIG_FILE: &str = "config.ron";

/// Overrides `api_base_url`
pub const ENV_API_URL: &str = "OFFICE_BUILDER_API_URL";

/// Overrides `local_backend` ("1"/"true" enable, "0"/"false" disable)
pub const ENV_LOCAL_BACKEND: &str = "OFFICE_BUILDER_LOCAL_BACKEND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid config: {0}")]
    Parse(String),
}

/// One palette entry as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    pub name: String,
    pub rgb: [u8; 3],
}

impl TileConfig {
    pub fn new(name: impl Into<String>, rgb: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme + host + port of the REST backend; request paths start with `/api`
    pub api_base_url: String,
    /// Tile types available in the editor, in button order
    pub palette: Vec<TileConfig>,
    /// Delay before the world list is re-fetched after a create
    pub refresh_delay_secs: f64,
    /// On-screen size of one grid cell in pixels
    pub cell_size: f32,
    /// Start an in-process backend instead of talking to `api_base_url`
    pub local_backend: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5136".to_string(),
            palette: default_palette(),
            refresh_delay_secs: 0.3,
            cell_size: 32.0,
            local_backend: false,
        }
    }
}

/// BasicTile1 - BasicTile5
pub fn default_palette() -> Vec<TileConfig> {
    vec![
        TileConfig::new("BasicTile1", [196, 164, 132]),
        TileConfig::new("BasicTile2", [120, 144, 156]),
        TileConfig::new("BasicTile3", [102, 187, 106]),
        TileConfig::new("BasicTile4", [66, 165, 245]),
        TileConfig::new("BasicTile5", [239, 83, 80]),
    ]
}

impl ClientConfig {
    /// Parse a config from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read the config file from storage. A missing file yields defaults.
    pub fn load_from(storage: &LocalStorage) -> Result<Self, ConfigError> {
        match storage.read_string(CONFIG_FILE) {
            Ok(text) => Self::from_ron(&text),
            Err(StorageError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load from storage, apply environment overrides, and log (not fail) on a broken file
    pub fn load(storage: &LocalStorage) -> Self {
        let mut config = match Self::load_from(storage) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim();
            if !url.is_empty() {
                self.api_base_url = url.to_string();
            }
        }
        if let Some(flag) = lookup(ENV_LOCAL_BACKEND) {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.local_backend = true,
                "0" | "false" | "no" => self.local_backend = false,
                other => tracing::warn!("Ignoring {}={}", ENV_LOCAL_BACKEND, other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn to_ron(config: &ClientConfig) -> String {
        ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        let config = ClientConfig::load_from(&storage).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.palette[0].name, "BasicTile1");
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = ClientConfig::from_ron(
            r#"(api_base_url: "http://example.test:8080", refresh_delay_secs: 1.5)"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://example.test:8080");
        assert_eq!(config.refresh_delay_secs, 1.5);
        assert_eq!(config.palette, default_palette());
        assert!(!config.local_backend);
    }

    #[test]
    fn test_ron_round_trip_through_storage() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());

        let mut config = ClientConfig::default();
        config.palette = vec![TileConfig::new("Desk", [10, 20, 30])];
        config.cell_size = 24.0;
        storage.write_string(CONFIG_FILE, &to_ron(&config)).unwrap();

        assert_eq!(ClientConfig::load_from(&storage).unwrap(), config);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        storage.write_string(CONFIG_FILE, "(api_base_url: ").unwrap();

        assert!(matches!(ClientConfig::load_from(&storage), Err(ConfigError::Parse(_))));
        // The lenient loader falls back to defaults
        assert_eq!(ClientConfig::load(&storage).palette, default_palette());
    }

    #[test]
    fn test_shipped_example_matches_defaults() {
        let config = ClientConfig::from_ron(include_str!("../config.example.ron")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, " http://10.0.0.2:5136 "),
            (ENV_LOCAL_BACKEND, "TRUE"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.2:5136");
        assert!(config.local_backend);

        config.apply_overrides(|k| (k == ENV_LOCAL_BACKEND).then(|| "maybe".to_string()));
        assert!(config.local_backend);
    }
}
