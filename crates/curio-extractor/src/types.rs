//! Request and result types for extraction

use curio_domain::Clause;
use serde::Serialize;
use std::fmt;

/// Document formats the pipeline knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.pdf`
    Pdf,
    /// `.doc` / `.docx`
    Word,
    /// `.zip` archive of documents
    Zip,
}

impl DocumentFormat {
    /// Pick a format from a file name's extension (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use curio_extractor::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_filename("RFP.PDF"), Some(DocumentFormat::Pdf));
    /// assert_eq!(DocumentFormat::from_filename("scope.docx"), Some(DocumentFormat::Word));
    /// assert_eq!(DocumentFormat::from_filename("notes.txt"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "doc" | "docx" => Some(DocumentFormat::Word),
            "zip" => Some(DocumentFormat::Zip),
            _ => None,
        }
    }

    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Word => "word",
            DocumentFormat::Zip => "zip",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of extracting clauses from one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Clauses in document order
    pub clauses: Vec<Clause>,

    /// Page count for PDFs, a rough estimate for Word, absent otherwise
    pub total_pages: Option<usize>,

    /// Non-directory members seen, for archives only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_processed: Option<usize>,
}

impl ExtractionResult {
    /// A result with no clauses and no page information
    pub fn empty() -> Self {
        Self::default()
    }
}
