//! Trait definitions for external collaborators
//!
//! The extraction pipeline itself is a pure function of document bytes. The
//! traits here describe what it hands its results to (persistence) and where
//! uploaded documents come from (file storage). Implementations live in
//! `curio-store`.

use crate::{Clause, NewRfp, RecordId, Rfp, RfpStatus};
use serde::{Deserialize, Serialize};

/// A clause as persisted under its parent RFP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredClause {
    /// Generated identifier
    pub id: RecordId,

    /// Parent RFP
    pub rfp_id: RecordId,

    /// The extracted clause
    #[serde(flatten)]
    pub clause: Clause,

    /// Insertion time (seconds since epoch)
    pub created_at: u64,
}

/// Persistence for extracted clauses
///
/// Implemented by the infrastructure layer (curio-store)
pub trait ClauseStore {
    /// Error type for store operations
    type Error;

    /// Store clauses under an RFP, assigning ids and timestamps
    ///
    /// The returned records are in the same order as `clauses`.
    fn save_clauses(
        &mut self,
        rfp_id: RecordId,
        clauses: &[Clause],
    ) -> Result<Vec<StoredClause>, Self::Error>;

    /// Clauses of one RFP in insertion order
    fn clauses_for_rfp(&self, rfp_id: RecordId) -> Result<Vec<StoredClause>, Self::Error>;

    /// Every stored clause in insertion order
    fn all_clauses(&self) -> Result<Vec<StoredClause>, Self::Error>;
}

/// Persistence for RFP records
pub trait RfpStore {
    /// Error type for store operations
    type Error;

    /// Register a new RFP with status `uploaded`
    fn create_rfp(&mut self, rfp: NewRfp) -> Result<Rfp, Self::Error>;

    /// Get an RFP by id
    fn get_rfp(&self, id: RecordId) -> Result<Option<Rfp>, Self::Error>;

    /// All RFPs, newest first
    fn list_rfps(&self) -> Result<Vec<Rfp>, Self::Error>;

    /// Update status and clause count; returns the updated record
    fn update_rfp_status(
        &mut self,
        id: RecordId,
        status: RfpStatus,
        clauses_count: Option<usize>,
    ) -> Result<Option<Rfp>, Self::Error>;
}

/// Where an uploaded file was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Local filesystem path
    pub path: String,

    /// URL the file is addressed by
    pub url: String,

    /// Stored file name
    pub file_name: String,
}

/// Storage for uploaded documents
pub trait DocumentStorage {
    /// Error type for storage operations
    type Error;

    /// Save an uploaded document
    fn save_upload(&self, content: &[u8], file_name: &str) -> Result<StoredFile, Self::Error>;

    /// Resolve a URL to document bytes
    ///
    /// Returns `Ok(None)` when the URL is not served by this storage and has
    /// to be fetched remotely instead.
    fn read_url(&self, url: &str) -> Result<Option<Vec<u8>>, Self::Error>;
}
