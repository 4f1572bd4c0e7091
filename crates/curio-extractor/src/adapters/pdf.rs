//! PDF text extraction

use crate::error::ExtractorError;
use crate::types::DocumentFormat;
use lopdf::Document;
use std::fmt;
use tracing::{debug, warn};

/// Text of a PDF with page markers between pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfText {
    /// `\n[PAGE n]\n<page text>` for every page, in page order
    pub text: String,

    /// Number of pages in the document
    pub total_pages: usize,
}

/// Read every page of a PDF into one marked-up text blob
///
/// A page whose text cannot be decoded is logged and contributes only its
/// marker; the document as a whole fails only when it cannot be loaded.
pub fn read_pdf(payload: &[u8]) -> Result<PdfText, ExtractorError> {
    let document = Document::load_mem(payload)
        .map_err(|e| ExtractorError::malformed(DocumentFormat::Pdf, e))?;

    let pages = document.get_pages();
    let mut text = String::new();

    for &number in pages.keys() {
        push_page(&mut text, number, document.extract_text(&[number]));
    }

    debug!("Read {} PDF pages, {} chars", pages.len(), text.len());

    Ok(PdfText {
        text,
        total_pages: pages.len(),
    })
}

/// Append one page behind its marker; an undecodable page adds the marker only
fn push_page<E: fmt::Display>(text: &mut String, number: u32, page_text: Result<String, E>) {
    let page_text = page_text.unwrap_or_else(|e| {
        warn!("No text extracted from PDF page {}: {}", number, e);
        String::new()
    });
    text.push_str(&format!("\n[PAGE {}]\n{}", number, page_text));
}

/// Page number of a `[PAGE n]` marker fragment
///
/// # Examples
///
/// ```
/// use curio_extractor::adapters::page_marker;
///
/// assert_eq!(page_marker("[PAGE 12]"), Some(12));
/// assert_eq!(page_marker("Page 12"), None);
/// ```
pub fn page_marker(fragment: &str) -> Option<u32> {
    fragment
        .strip_prefix("[PAGE ")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::pdf_with_pages;

    #[test]
    fn test_read_pdf_marks_pages() {
        let payload = pdf_with_pages(&["Alpha page text", "Beta page text"]);
        let pdf = read_pdf(&payload).unwrap();

        assert_eq!(pdf.total_pages, 2);
        let first = pdf.text.find("[PAGE 1]").unwrap();
        let alpha = pdf.text.find("Alpha page text").unwrap();
        let second = pdf.text.find("[PAGE 2]").unwrap();
        let beta = pdf.text.find("Beta page text").unwrap();
        assert!(first < alpha && alpha < second && second < beta);
    }

    #[test]
    fn test_read_pdf_rejects_garbage() {
        let err = read_pdf(b"%PDF-1.4 this is not really a pdf").unwrap_err();
        assert!(matches!(
            err,
            ExtractorError::MalformedDocument { format: DocumentFormat::Pdf, .. }
        ));
    }

    #[test]
    fn test_undecodable_page_keeps_its_marker() {
        let mut text = String::new();
        push_page::<String>(&mut text, 1, Ok("Vendors must bring manikins".to_string()));
        push_page(&mut text, 2, Err("unknown operator"));
        push_page::<String>(&mut text, 3, Ok("Trainers should be certified".to_string()));

        assert_eq!(
            text,
            "\n[PAGE 1]\nVendors must bring manikins\n[PAGE 2]\n\n[PAGE 3]\nTrainers should be certified"
        );
    }

    #[test]
    fn test_page_marker() {
        assert_eq!(page_marker("[PAGE 1]"), Some(1));
        assert_eq!(page_marker("[PAGE x]"), None);
        assert_eq!(page_marker("[PAGE 1] trailing"), None);
    }
}
