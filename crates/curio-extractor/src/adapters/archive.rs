//! ZIP archive listing and member access

use crate::error::ExtractorError;
use crate::types::DocumentFormat;
use std::io::{Cursor, Read};
use tracing::warn;
use zip::ZipArchive;

/// Prefix archiving tools use for metadata entries such as `__MACOSX/`
const HIDDEN_PREFIX: &str = "__";

/// One entry in an archive's central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the central directory
    pub index: usize,

    /// Path inside the archive
    pub name: String,

    /// Declared uncompressed size (bytes)
    pub size: u64,
}

impl ArchiveEntry {
    /// Directory entries end with a slash
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Tool metadata entries, skipped during extraction
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with(HIDDEN_PREFIX)
    }

    /// Document format of a member worth extracting
    ///
    /// `None` for directories, hidden entries, nested archives and anything
    /// that is not a PDF or Word file.
    pub fn document_format(&self) -> Option<DocumentFormat> {
        if self.is_dir() || self.is_hidden() {
            return None;
        }
        DocumentFormat::from_filename(&self.name).filter(|f| *f != DocumentFormat::Zip)
    }
}

/// Random access to the members of an in-memory ZIP payload
pub struct ArchiveReader<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ArchiveReader<'a> {
    /// Open an archive, failing with `InvalidArchive` if it is malformed
    pub fn new(payload: &'a [u8]) -> Result<Self, ExtractorError> {
        let archive = ZipArchive::new(Cursor::new(payload))
            .map_err(|e| ExtractorError::InvalidArchive(e.to_string()))?;
        Ok(Self { archive })
    }

    /// Entries in central directory order
    ///
    /// Entries whose header cannot be read are logged and left out.
    pub fn entries(&mut self) -> Vec<ArchiveEntry> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            match self.archive.by_index_raw(index) {
                Ok(file) => entries.push(ArchiveEntry {
                    index,
                    name: file.name().to_string(),
                    size: file.size(),
                }),
                Err(e) => warn!("Unreadable archive entry #{}: {}", index, e),
            }
        }
        entries
    }

    /// Decompress one member into memory
    pub fn read(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>, ExtractorError> {
        let mut file = self
            .archive
            .by_index(entry.index)
            .map_err(|e| ExtractorError::InvalidArchive(format!("{}: {}", entry.name, e)))?;

        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)
            .map_err(|e| ExtractorError::InvalidArchive(format!("{}: {}", entry.name, e)))?;
        Ok(content)
    }
}
