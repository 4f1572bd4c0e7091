//! Curio Domain Layer
//!
//! Core value types and collaborator interfaces for the Curio curriculum
//! backend. Everything that flows out of the clause extraction pipeline is
//! defined here so that the extractor, the store and the HTTP layer agree on
//! a single concrete shape.
//!
//! ## Key Concepts
//!
//! - **Clause**: one extracted requirement sentence with a priority and a category
//! - **Priority**: strength of obligation (must / should / may)
//! - **Category**: subject-matter bucket (duration / content / assessment / equipment / other)
//! - **Rfp**: the uploaded request-for-proposal a set of clauses belongs to
//!
//! ## Architecture
//!
//! - Pure data types and trait definitions only
//! - Persistence and file storage are implemented in `curio-store`
//! - Extraction is implemented in `curio-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clause;
pub mod id;
pub mod rfp;
pub mod traits;

// Re-exports for convenience
pub use clause::{Category, Clause, Priority};
pub use id::RecordId;
pub use rfp::{NewRfp, Rfp, RfpStatus};
pub use traits::{ClauseStore, DocumentStorage, RfpStore, StoredClause, StoredFile};

/// Current time as seconds since the Unix epoch
///
/// Falls back to 0 if the system clock is set before 1970.
pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
