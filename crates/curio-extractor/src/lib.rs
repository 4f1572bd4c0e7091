//! Curio Extractor
//!
//! Turns RFP documents into classified requirement clauses with keyword
//! heuristics.
//!
//! # Architecture
//!
//! ```text
//! bytes → adapter (PDF / Word / ZIP) → segmenter → detector → classifiers → Clauses
//! ```
//!
//! - PDFs are read into one page-marked text blob and split into sentences.
//! - Word documents are read as body paragraphs; each paragraph is one unit.
//! - ZIP archives are walked member by member and every PDF or Word member is
//!   fed back through the pipeline, with the member path recorded as the
//!   clause's section. Members that fail to parse are logged and skipped.
//!
//! A fragment becomes a clause when it is at least `min_clause_chars` long
//! after trimming and either contains a priority keyword or starts with list
//! numbering. Priority comes from the first matching keyword set
//! (must, should, may); category from the highest keyword score.
//!
//! # Example Usage
//!
//! ```no_run
//! use curio_extractor::{Extractor, ExtractorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(ExtractorConfig::default())?;
//!
//! let payload = std::fs::read("cpr-training-rfp.pdf")?;
//! let result = extractor.extract_from_bytes(&payload, "cpr-training-rfp.pdf")?;
//! for clause in &result.clauses {
//!     println!("[{}/{}] {}", clause.priority(), clause.category(), clause.text());
//! }
//!
//! let remote = extractor
//!     .extract_from_url("https://example.org/rfp.zip", "rfp.zip")
//!     .await?;
//! println!("{} clauses from {:?} files", remote.clauses.len(), remote.files_processed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classify;
mod config;
mod detect;
mod error;
mod extractor;
mod fetch;
mod pipeline;
mod segment;
mod types;

pub mod adapters;

#[cfg(test)]
mod fixtures;

pub use classify::{
    category_score, classify_category, classify_priority, CATEGORY_KEYWORDS, PRIORITY_KEYWORDS,
};
pub use config::ExtractorConfig;
pub use detect::is_requirement;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use fetch::DocumentFetcher;
pub use pipeline::ClausePipeline;
pub use segment::segment;
pub use types::{DocumentFormat, ExtractionResult};

use curio_domain::Clause;

/// Extract clauses from a payload with the default configuration
///
/// # Examples
///
/// ```
/// let clauses = curio_extractor::extract(b"just some notes", "notes.txt").unwrap();
/// assert!(clauses.is_empty());
/// ```
pub fn extract(payload: &[u8], filename: &str) -> Result<Vec<Clause>, ExtractorError> {
    ClausePipeline::default()
        .extract_from_bytes(payload, filename)
        .map(|result| result.clauses)
}
