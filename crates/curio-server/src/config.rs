//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, database and
//! upload locations, and the `[extractor]` table.

use curio_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// SQLite database file, or `:memory:`
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Root directory for uploaded documents
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Clause extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("curio.db")
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("local_storage")
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.extractor.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Create a default configuration for testing
    ///
    /// Uses an in-memory database; uploads still go to `./local_storage`.
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            database_path: PathBuf::from(":memory:"),
            storage_dir: default_storage_dir(),
            extractor: ExtractorConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
