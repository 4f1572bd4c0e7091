//! Error types for the Extractor

use crate::types::DocumentFormat;
use thiserror::Error;

/// Errors that can occur during clause extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// File extension not recognized (strict mode only)
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Remote retrieval of the document failed
    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        /// URL that was requested
        url: String,
        /// Transport error or HTTP status
        reason: String,
    },

    /// ZIP payload is not a well-formed archive
    #[error("Invalid ZIP file: {0}")]
    InvalidArchive(String),

    /// A PDF or Word payload could not be parsed
    ///
    /// Inside an archive this is logged and the member skipped.
    #[error("Failed to parse {format} document: {reason}")]
    MalformedDocument {
        /// Format the payload was declared as
        format: DocumentFormat,
        /// Parser error
        reason: String,
    },

    /// Payload exceeds the configured size limit
    #[error("Document too large: {0} bytes (max: {1})")]
    DocumentTooLarge(usize, usize),

    /// Background parsing task failed
    #[error("Extraction task failed: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    pub(crate) fn malformed(format: DocumentFormat, reason: impl ToString) -> Self {
        ExtractorError::MalformedDocument {
            format,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        ExtractorError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
