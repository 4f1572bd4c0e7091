//! RFP records - the parent of every stored clause

use crate::RecordId;
use serde::{Deserialize, Serialize};

/// Processing state of an uploaded RFP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RfpStatus {
    /// Stored, not yet parsed
    Uploaded,

    /// Clauses extracted and saved
    Parsed,

    /// Extraction failed
    Error,
}

impl RfpStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RfpStatus::Uploaded => "uploaded",
            RfpStatus::Parsed => "parsed",
            RfpStatus::Error => "error",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "uploaded" => Some(RfpStatus::Uploaded),
            "parsed" => Some(RfpStatus::Parsed),
            "error" => Some(RfpStatus::Error),
            _ => None,
        }
    }
}

/// A stored request-for-proposal document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rfp {
    /// Unique identifier
    pub id: RecordId,

    /// Display title (falls back to the file name)
    pub title: String,

    /// Issuing organization
    pub organization: String,

    /// Free-form description
    pub description: String,

    /// Where the uploaded document can be retrieved
    pub file_url: String,

    /// Original file name as uploaded
    pub file_name: String,

    /// Processing state
    pub status: RfpStatus,

    /// Number of clauses extracted
    pub clauses_count: usize,

    /// Creation time (seconds since epoch)
    pub created_at: u64,

    /// Last update time (seconds since epoch)
    pub updated_at: u64,
}

/// Fields supplied when registering a new RFP
#[derive(Debug, Clone, Default)]
pub struct NewRfp {
    /// Display title; the file name is used when empty
    pub title: String,

    /// Issuing organization
    pub organization: String,

    /// Free-form description
    pub description: String,

    /// Where the uploaded document can be retrieved
    pub file_url: String,

    /// Original file name
    pub file_name: String,
}

impl NewRfp {
    /// Title to store, defaulting to the file name
    pub fn effective_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.file_name
        } else {
            &self.title
        }
    }
}
