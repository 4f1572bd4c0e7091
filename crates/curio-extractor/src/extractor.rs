//! Async front end over the clause pipeline

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fetch::DocumentFetcher;
use crate::pipeline::ClausePipeline;
use crate::types::ExtractionResult;
use std::sync::Arc;
use tracing::info;

/// The Extractor turns uploaded or remote documents into clauses
///
/// Parsing is CPU-bound, so the async entry points run the pipeline on the
/// blocking thread pool. Cloning is cheap and clones share the pipeline and
/// HTTP client.
#[derive(Debug, Clone)]
pub struct Extractor {
    pipeline: Arc<ClausePipeline>,
    fetcher: DocumentFetcher,
}

impl Extractor {
    /// Create a new Extractor, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let fetcher = DocumentFetcher::new(config.fetch_timeout(), config.max_document_bytes)?;
        Ok(Self {
            pipeline: Arc::new(ClausePipeline::new(config)),
            fetcher,
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        self.pipeline.config()
    }

    /// Extract clauses on the calling thread
    pub fn extract_from_bytes(
        &self,
        payload: &[u8],
        filename: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        self.pipeline.extract_from_bytes(payload, filename)
    }

    /// Extract clauses on the blocking thread pool
    pub async fn extract_offloaded(
        &self,
        payload: Vec<u8>,
        filename: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        let pipeline = Arc::clone(&self.pipeline);
        let filename = filename.to_string();

        tokio::task::spawn_blocking(move || pipeline.extract_from_bytes(&payload, &filename))
            .await
            .map_err(|e| ExtractorError::Task(e.to_string()))?
    }

    /// Download a document and extract its clauses
    ///
    /// `filename` decides the format, not the URL.
    pub async fn extract_from_url(
        &self,
        url: &str,
        filename: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        info!("Extracting clauses from {} as '{}'", url, filename);
        let payload = self.fetcher.fetch(url).await?;
        self.extract_offloaded(payload, filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            min_clause_chars: 0,
            ..Default::default()
        };
        assert!(matches!(Extractor::new(config), Err(ExtractorError::Config(_))));
    }

    #[tokio::test]
    async fn test_offloaded_matches_inline() {
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let inline = extractor.extract_from_bytes(b"plain", "notes.txt").unwrap();
        let offloaded = extractor
            .extract_offloaded(b"plain".to_vec(), "notes.txt")
            .await
            .unwrap();
        assert_eq!(inline, offloaded);
    }
}
