//! Runtime configuration for the catalog binary
//!
//! Configuration is an optional JSON file; every field has a default so an
//! empty object (or no file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the working directory by the binary
pub const DEFAULT_CONFIG_FILE: &str = "catalog.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding save files; falls back to `~/.game_catalog/saves`
    pub save_directory: Option<PathBuf>,
    /// Name of the manual save used by the binary
    pub save_name: String,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            save_directory: None,
            save_name: "game_save".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `load_from_file`, but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn resolve_save_directory(&self) -> PathBuf {
        if let Some(dir) = &self.save_directory {
            return dir.clone();
        }
        dirs::home_dir()
            .map(|p| p.join(".game_catalog/saves"))
            .unwrap_or_else(|| PathBuf::from("./saves"))
    }
}
