//! Synchronous clause extraction over in-memory documents

use crate::adapters::{archive::ArchiveReader, page_marker, pdf, word};
use crate::classify::{classify_category, classify_priority};
use crate::config::ExtractorConfig;
use crate::detect::is_requirement;
use crate::error::ExtractorError;
use crate::segment::segment;
use crate::types::{DocumentFormat, ExtractionResult};
use curio_domain::Clause;
use tracing::{debug, info, warn};

/// Turns document bytes into classified clauses
///
/// Holds nothing but configuration, so one pipeline can serve any number of
/// documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ClausePipeline {
    config: ExtractorConfig,
}

impl ClausePipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract clauses from a payload, dispatching on the file name's extension
    ///
    /// Unknown extensions give an empty result, or `UnsupportedFormat` when
    /// `strict_formats` is set.
    pub fn extract_from_bytes(
        &self,
        payload: &[u8],
        filename: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        if payload.len() > self.config.max_document_bytes {
            return Err(ExtractorError::DocumentTooLarge(
                payload.len(),
                self.config.max_document_bytes,
            ));
        }

        let Some(format) = DocumentFormat::from_filename(filename) else {
            if self.config.strict_formats {
                return Err(ExtractorError::UnsupportedFormat(filename.to_string()));
            }
            warn!("Unsupported file type, no clauses extracted: {}", filename);
            return Ok(ExtractionResult::empty());
        };

        info!(
            "Extracting clauses from '{}' ({}, {} bytes)",
            filename,
            format,
            payload.len()
        );

        let result = match format {
            DocumentFormat::Zip => self.extract_archive(payload)?,
            _ => self.extract_document(payload, format)?,
        };

        info!("Extracted {} clauses from '{}'", result.clauses.len(), filename);
        Ok(result)
    }

    /// Extract clauses from a single PDF or Word document
    ///
    /// Archives are not documents; passing `DocumentFormat::Zip` here gives
    /// `UnsupportedFormat`.
    pub fn extract_document(
        &self,
        payload: &[u8],
        format: DocumentFormat,
    ) -> Result<ExtractionResult, ExtractorError> {
        match format {
            DocumentFormat::Pdf => {
                let pdf = pdf::read_pdf(payload)?;
                Ok(ExtractionResult {
                    clauses: self.clauses_from_text(&pdf.text),
                    total_pages: Some(pdf.total_pages),
                    files_processed: None,
                })
            }
            DocumentFormat::Word => {
                let word = word::read_word(payload)?;
                Ok(ExtractionResult {
                    clauses: self.clauses_from_paragraphs(word.paragraphs.iter().map(String::as_str)),
                    total_pages: Some(word.estimated_pages()),
                    files_processed: None,
                })
            }
            DocumentFormat::Zip => Err(ExtractorError::UnsupportedFormat(
                "nested archive".to_string(),
            )),
        }
    }

    /// Extract clauses from every PDF and Word member of a ZIP archive
    ///
    /// Members are processed in directory order. A member that cannot be read
    /// or parsed is logged and skipped. Each clause's section is set to the
    /// member's path behind `section_prefix`.
    pub fn extract_archive(&self, payload: &[u8]) -> Result<ExtractionResult, ExtractorError> {
        let mut reader = ArchiveReader::new(payload)?;
        let mut clauses = Vec::new();
        let mut files_processed = 0;

        for entry in reader.entries() {
            if entry.is_dir() {
                continue;
            }
            files_processed += 1;

            let Some(format) = entry.document_format() else {
                debug!("Skipping archive member '{}'", entry.name);
                continue;
            };

            if entry.size > self.config.max_document_bytes as u64 {
                warn!(
                    "Skipping archive member '{}': {} bytes exceeds limit of {}",
                    entry.name, entry.size, self.config.max_document_bytes
                );
                continue;
            }

            let extracted = reader
                .read(&entry)
                .and_then(|bytes| self.extract_document(&bytes, format));

            match extracted {
                Ok(result) => {
                    debug!(
                        "Archive member '{}' yielded {} clauses",
                        entry.name,
                        result.clauses.len()
                    );
                    let section = format!("{}{}", self.config.section_prefix, entry.name);
                    clauses.extend(
                        result
                            .clauses
                            .into_iter()
                            .map(|clause| clause.with_section(section.clone())),
                    );
                }
                Err(e) => warn!("Skipping archive member '{}': {}", entry.name, e),
            }
        }

        Ok(ExtractionResult {
            clauses,
            total_pages: None,
            files_processed: Some(files_processed),
        })
    }

    /// Segment free text and keep the fragments that read as requirements
    ///
    /// `[PAGE n]` markers are consumed; with `attach_page_numbers` set the
    /// clauses after a marker carry that page number.
    pub fn clauses_from_text(&self, text: &str) -> Vec<Clause> {
        let mut page = None;
        let mut clauses = Vec::new();

        for fragment in segment(text) {
            if let Some(number) = page_marker(fragment) {
                page = Some(number);
                continue;
            }
            if let Some(clause) = self.build_clause(fragment) {
                clauses.push(match page {
                    Some(number) if self.config.attach_page_numbers => {
                        clause.with_page_number(number)
                    }
                    _ => clause,
                });
            }
        }

        clauses
    }

    /// Treat each paragraph as one candidate fragment
    pub fn clauses_from_paragraphs<'a>(
        &self,
        paragraphs: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Clause> {
        paragraphs
            .into_iter()
            .filter_map(|paragraph| self.build_clause(paragraph))
            .collect()
    }

    fn build_clause(&self, fragment: &str) -> Option<Clause> {
        let text = fragment.trim();
        if text.chars().count() < self.config.min_clause_chars || !is_requirement(text) {
            return None;
        }
        Some(Clause::new(
            text,
            classify_category(text),
            classify_priority(text),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_domain::{Category, Priority};

    #[test]
    fn test_short_fragments_dropped() {
        let pipeline = ClausePipeline::default();
        // 19 chars with a keyword
        assert!(pipeline.clauses_from_text("You must bring pens").is_empty());
        // 20 chars with a keyword
        assert_eq!(pipeline.clauses_from_text("You must bring pens!").len(), 1);
        // whitespace does not count towards the minimum
        assert!(pipeline.clauses_from_text("     You must bring pens     ").is_empty());
    }

    #[test]
    fn test_narrative_fragments_dropped() {
        let pipeline = ClausePipeline::default();
        let clauses =
            pipeline.clauses_from_text("The county was founded long ago.\nVendors shall provide manikins.");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text(), "Vendors shall provide manikins.");
        assert_eq!(clauses[0].priority(), Priority::Must);
        assert_eq!(clauses[0].category(), Category::Other);
    }

    #[test]
    fn test_page_numbers_off_by_default() {
        let pipeline = ClausePipeline::default();
        let clauses = pipeline.clauses_from_text("\n[PAGE 3]\nThe vendor must supply equipment.\n");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].page_number(), None);
    }

    #[test]
    fn test_page_numbers_attached_when_enabled() {
        let pipeline = ClausePipeline::new(ExtractorConfig {
            attach_page_numbers: true,
            ..Default::default()
        });
        let text = "Vendors shall register before page markers.\n[PAGE 1]\nThe vendor must supply equipment.\n[PAGE 2]\nTrainers should hold certification.";
        let clauses = pipeline.clauses_from_text(text);
        let pages: Vec<Option<u32>> = clauses.iter().map(Clause::page_number).collect();
        assert_eq!(pages, vec![None, Some(1), Some(2)]);
    }

    #[test]
    fn test_paragraphs_are_not_segmented() {
        let pipeline = ClausePipeline::default();
        let clauses = pipeline.clauses_from_paragraphs([
            "Trainers must be certified. Classes last four hours.",
            "",
            "Short one",
        ]);
        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].text(),
            "Trainers must be certified. Classes last four hours."
        );
    }

    #[test]
    fn test_enumerated_paragraph_defaults_to_may() {
        let pipeline = ClausePipeline::default();
        let clauses = pipeline.clauses_from_paragraphs(["3) Provide printed handouts for everyone"]);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].priority(), Priority::May);
    }

    #[test]
    fn test_min_clause_chars_configurable() {
        let pipeline = ClausePipeline::new(ExtractorConfig {
            min_clause_chars: 5,
            ..Default::default()
        });
        assert_eq!(pipeline.clauses_from_text("Must go").len(), 1);
    }

    #[test]
    fn test_nested_archive_is_not_a_document() {
        let pipeline = ClausePipeline::default();
        let result = pipeline.extract_document(b"PK", DocumentFormat::Zip);
        assert!(matches!(result, Err(ExtractorError::UnsupportedFormat(_))));
    }
}
