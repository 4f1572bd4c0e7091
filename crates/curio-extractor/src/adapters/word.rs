//! Word (OOXML) paragraph extraction
//!
//! Reads `word/document.xml` out of the package and collects the text of the
//! body's top-level paragraphs. Table cells, headers and footers are not
//! included. Legacy binary `.doc` files are not OOXML packages and fail to
//! parse.

use crate::error::ExtractorError;
use crate::types::DocumentFormat;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph texts of a Word document in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordText {
    /// Untrimmed paragraph text, empty paragraphs included
    pub paragraphs: Vec<String>,
}

impl WordText {
    /// Rough page count: ten paragraphs to a page
    ///
    /// Word files carry no layout, so this is only an estimate.
    pub fn estimated_pages(&self) -> usize {
        self.paragraphs.len() / 10
    }
}

/// Read body paragraphs from a `.docx` payload
pub fn read_word(payload: &[u8]) -> Result<WordText, ExtractorError> {
    let mut package = zip::ZipArchive::new(Cursor::new(payload))
        .map_err(|e| ExtractorError::malformed(DocumentFormat::Word, e))?;

    let mut xml = String::new();
    package
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractorError::malformed(DocumentFormat::Word, format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractorError::malformed(DocumentFormat::Word, e))?;

    let paragraphs = parse_paragraphs(&xml)?;
    debug!("Read {} Word paragraphs", paragraphs.len());

    Ok(WordText { paragraphs })
}

/// Elements inside a paragraph whose text belongs to something else
///
/// Text boxes carry their own paragraphs, and Word writes them twice (once
/// per `mc:Choice` / `mc:Fallback` branch).
const FOREIGN_CONTENT: [&[u8]; 3] = [b"p", b"txbxContent", b"AlternateContent"];

/// Collect the text of every `w:p` that sits directly under `w:body`
///
/// Only the paragraph's own runs count; nested paragraphs and text boxes are
/// left out.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>, ExtractorError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut paragraph_depth = 0;
    let mut foreign_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractorError::malformed(DocumentFormat::Word, e))?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if current.is_some() {
                    if FOREIGN_CONTENT.contains(&name.as_slice()) {
                        foreign_depth += 1;
                    }
                } else if name == b"p" && parent_is(&stack, b"body") {
                    current = Some(String::new());
                    paragraph_depth = stack.len();
                }
                if name == b"t" {
                    in_text = true;
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                let own_run = foreign_depth == 0 && parent_is(&stack, b"r");
                match name.as_ref() {
                    b"p" if current.is_none() && parent_is(&stack, b"body") => {
                        paragraphs.push(String::new());
                    }
                    b"tab" if own_run => {
                        if let Some(paragraph) = current.as_mut() {
                            paragraph.push('\t');
                        }
                    }
                    b"br" | b"cr" if own_run => {
                        if let Some(paragraph) = current.as_mut() {
                            paragraph.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if in_text && foreign_depth == 0 {
                    if let Some(paragraph) = current.as_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| ExtractorError::malformed(DocumentFormat::Word, e))?;
                        paragraph.push_str(&text);
                    }
                }
            }
            Event::End(e) => {
                stack.pop();
                let name = e.local_name();
                if name.as_ref() == b"t" {
                    in_text = false;
                }
                if current.is_some() {
                    if name.as_ref() == b"p" && stack.len() == paragraph_depth {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                        foreign_depth = 0;
                    } else if FOREIGN_CONTENT.contains(&name.as_ref()) {
                        foreign_depth = foreign_depth.saturating_sub(1);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|parent| parent.as_slice() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{docx_from_body, docx_with_paragraphs};

    #[test]
    fn test_read_word_paragraphs_in_order() {
        let payload = docx_with_paragraphs(&["First paragraph", "", "Third & last"]);
        let word = read_word(&payload).unwrap();
        assert_eq!(word.paragraphs, vec!["First paragraph", "", "Third & last"]);
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let body = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t xml:space="preserve">Split </w:t></w:r><w:r><w:t>run</w:t><w:tab/><w:t>tabbed</w:t><w:br/><w:t>broken</w:t></w:r></w:p>"#;
        let word = read_word(&docx_from_body(body)).unwrap();
        assert_eq!(word.paragraphs, vec!["Split run\ttabbed\nbroken"]);
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let body = r#"<w:p><w:r><w:t>Before table</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>In a cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>After table</w:t></w:r></w:p>"#;
        let word = read_word(&docx_from_body(body)).unwrap();
        assert_eq!(word.paragraphs, vec!["Before table", "After table"]);
    }

    #[test]
    fn test_text_boxes_are_not_part_of_the_paragraph() {
        let body = r#"<w:p><w:r><w:t>Vendors must attend orientation</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:txbx><w:txbxContent><w:p><w:r><w:t xml:space="preserve"> BOX</w:t></w:r></w:p></w:txbxContent></wps:txbx></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox><w:txbxContent><w:p><w:r><w:t xml:space="preserve"> BOX</w:t><w:tab/></w:r></w:p></w:txbxContent></v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p><w:p><w:r><w:t>Next paragraph</w:t></w:r></w:p>"#;
        let word = read_word(&docx_from_body(body)).unwrap();
        assert_eq!(
            word.paragraphs,
            vec!["Vendors must attend orientation", "Next paragraph"]
        );
    }

    #[test]
    fn test_hyperlink_text_is_kept() {
        let body = r#"<w:p><w:r><w:t xml:space="preserve">See </w:t></w:r><w:hyperlink r:id="rId4"><w:r><w:t>the portal</w:t></w:r></w:hyperlink></w:p>"#;
        let word = read_word(&docx_from_body(body)).unwrap();
        assert_eq!(word.paragraphs, vec!["See the portal"]);
    }

    #[test]
    fn test_estimated_pages() {
        let word = WordText {
            paragraphs: vec![String::new(); 25],
        };
        assert_eq!(word.estimated_pages(), 2);
        assert_eq!(WordText::default().estimated_pages(), 0);
    }

    #[test]
    fn test_not_a_package() {
        let err = read_word(b"\xd0\xcf\x11\xe0 legacy binary doc").unwrap_err();
        assert!(matches!(
            err,
            ExtractorError::MalformedDocument { format: DocumentFormat::Word, .. }
        ));
    }
}
