//! Curio Server
//!
//! HTTP API over the clause extraction pipeline: parse documents by URL,
//! upload RFPs and browse their extracted clauses.
//!
//! # Routes
//!
//! - `GET /health`
//! - `POST /api/rfp/parse` with `{file_url, file_name}`
//! - `POST /api/rfps?file_name=..&title=..&organization=..&description=..` with the raw file as body
//! - `GET /api/rfps`, `GET /api/rfps/:id`
//! - `GET /api/clauses?rfp_id=..`
//! - `GET /files/uploads/:name`

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use curio_extractor::{Extractor, ExtractorError};
use curio_store::{FileStorage, SqliteStore, StoreError};
use handlers::{create_router, AppState};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Extractor could not be built
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Database or upload directory could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

impl AppState {
    /// Open the database and upload storage and build the extractor
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        Ok(AppState {
            extractor: Extractor::new(config.extractor.clone())?,
            store: Arc::new(Mutex::new(SqliteStore::new(&config.database_path)?)),
            storage: Arc::new(FileStorage::new(&config.storage_dir)?),
        })
    }
}

/// Start the HTTP server
///
/// Opens storage, builds the router and serves until the process exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Curio server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path.display());
    info!("Upload storage: {}", config.storage_dir.display());

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default_test_config();
        config.storage_dir = dir.path().to_path_buf();

        let state = AppState::from_config(&config).unwrap();
        assert!(state.storage.uploads_dir().starts_with(dir.path()));
        assert_eq!(state.extractor.config().min_clause_chars, 20);
    }

    #[test]
    fn test_state_from_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default_test_config();
        config.storage_dir = dir.path().to_path_buf();
        config.extractor.fetch_timeout_secs = 0;

        assert!(matches!(
            AppState::from_config(&config),
            Err(ServerError::Extractor(ExtractorError::Config(_)))
        ));
    }
}
