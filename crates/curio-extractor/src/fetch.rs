//! Retrieval of documents by URL

use crate::error::ExtractorError;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for downloading documents into memory
///
/// One attempt per call; retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl DocumentFetcher {
    /// Create a fetcher with a per-request timeout and a download size limit
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, ExtractorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractorError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client, max_bytes })
    }

    /// Download a document
    ///
    /// Transport errors and non-2xx responses fail with `Fetch`; a body larger
    /// than the limit fails with `DocumentTooLarge`.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExtractorError> {
        debug!("Fetching document from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Fetch of {} failed: {}", url, e);
            ExtractorError::fetch(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetch of {} returned {}", url, status);
            return Err(ExtractorError::fetch(url, format!("HTTP {}", status)));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(ExtractorError::DocumentTooLarge(length as usize, self.max_bytes));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractorError::fetch(url, e))?;

        if body.len() > self.max_bytes {
            return Err(ExtractorError::DocumentTooLarge(body.len(), self.max_bytes));
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
