//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for clause extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Fragments shorter than this (characters, after trimming) are dropped
    pub min_clause_chars: usize,

    /// Fail with `UnsupportedFormat` instead of returning no clauses
    pub strict_formats: bool,

    /// Stamp PDF clauses with the page they were found on
    pub attach_page_numbers: bool,

    /// Prefix of the provenance label given to clauses from archive members
    pub section_prefix: String,

    /// Largest payload accepted (bytes)
    pub max_document_bytes: usize,

    /// Timeout for fetching a document by URL (seconds)
    pub fetch_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_clause_chars == 0 {
            return Err("min_clause_chars must be greater than 0".to_string());
        }
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Strict preset: unsupported formats are errors and PDF clauses carry pages
    pub fn strict() -> Self {
        Self {
            strict_formats: true,
            attach_page_numbers: true,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_clause_chars: 20,
            strict_formats: false,
            attach_page_numbers: false,
            section_prefix: "From: ".to_string(),
            max_document_bytes: 100 * 1024 * 1024,
            fetch_timeout_secs: 30,
        }
    }
}
