//! Per-format readers turning document bytes into text
//!
//! PDFs become one page-marked text blob that still has to be segmented.
//! Word documents become paragraphs, each of which is already a candidate
//! unit. Archives are listed here and their members fed back through the
//! other two readers by the pipeline.

pub mod archive;
pub mod pdf;
pub mod word;

pub use archive::{ArchiveEntry, ArchiveReader};
pub use pdf::{page_marker, PdfText};
pub use word::WordText;
