//! Curio Storage Layer
//!
//! Implements the `RfpStore` and `ClauseStore` traits on SQLite, and the
//! `DocumentStorage` trait on the local file system.
//!
//! # Architecture
//!
//! - SQLite for RFP records and their extracted clauses
//! - A directory of uploaded documents, addressed by `/files/uploads/<name>` URLs
//!
//! # Examples
//!
//! ```no_run
//! use curio_domain::{NewRfp, RfpStore};
//! use curio_store::SqliteStore;
//!
//! let mut store = SqliteStore::new("curio.db").unwrap();
//! let rfp = store
//!     .create_rfp(NewRfp {
//!         file_name: "cpr-training.pdf".to_string(),
//!         file_url: "/files/uploads/cpr-training.pdf".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! println!("Registered {}", rfp.id);
//! ```

#![warn(missing_docs)]

mod files;

pub use files::{sanitize_file_name, FileStorage, UPLOAD_URL_PREFIX};

use curio_domain::{
    now_secs, Category, Clause, ClauseStore, NewRfp, Priority, RecordId, Rfp, RfpStatus, RfpStore,
    StoredClause,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record or file not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const RFP_COLUMNS: &str = "id, title, organization, description, file_url, file_name, status, \
                           clauses_count, created_at, updated_at";

const CLAUSE_COLUMNS: &str =
    "id, rfp_id, text, category, priority, page_number, section, created_at";

/// SQLite-based implementation of `RfpStore` and `ClauseStore`
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store behind a mutex, or
/// give each thread its own instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!("Expected 16 bytes for RecordId, got {}", bytes.len()))
        })?;
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn rfp_from_row(row: &Row<'_>) -> rusqlite::Result<Rfp> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let status: String = row.get(6)?;

        Ok(Rfp {
            id: Self::bytes_to_id(&id_bytes).map_err(|e| conversion_error(0, e))?,
            title: row.get(1)?,
            organization: row.get(2)?,
            description: row.get(3)?,
            file_url: row.get(4)?,
            file_name: row.get(5)?,
            status: RfpStatus::parse(&status).ok_or_else(|| {
                conversion_error(6, StoreError::InvalidData(format!("Unknown status: {}", status)))
            })?,
            clauses_count: row.get::<_, i64>(7)? as usize,
            created_at: row.get::<_, i64>(8)? as u64,
            updated_at: row.get::<_, i64>(9)? as u64,
        })
    }

    fn clause_from_row(row: &Row<'_>) -> rusqlite::Result<StoredClause> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let rfp_bytes: Vec<u8> = row.get(1)?;
        let category: String = row.get(3)?;
        let priority: String = row.get(4)?;
        let page_number: Option<i64> = row.get(5)?;
        let section: Option<String> = row.get(6)?;

        let category = Category::parse(&category).ok_or_else(|| {
            conversion_error(3, StoreError::InvalidData(format!("Unknown category: {}", category)))
        })?;
        let priority = Priority::parse(&priority).ok_or_else(|| {
            conversion_error(4, StoreError::InvalidData(format!("Unknown priority: {}", priority)))
        })?;

        let mut clause = Clause::new(row.get::<_, String>(2)?, category, priority);
        if let Some(page) = page_number {
            clause = clause.with_page_number(page as u32);
        }
        if let Some(section) = section {
            clause = clause.with_section(section);
        }

        Ok(StoredClause {
            id: Self::bytes_to_id(&id_bytes).map_err(|e| conversion_error(0, e))?,
            rfp_id: Self::bytes_to_id(&rfp_bytes).map_err(|e| conversion_error(1, e))?,
            clause,
            created_at: row.get::<_, i64>(7)? as u64,
        })
    }
}

fn conversion_error(column: usize, e: StoreError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Blob, Box::new(e))
}

impl RfpStore for SqliteStore {
    type Error = StoreError;

    fn create_rfp(&mut self, rfp: NewRfp) -> Result<Rfp, Self::Error> {
        let now = now_secs();
        let record = Rfp {
            id: RecordId::new(),
            title: rfp.effective_title().to_string(),
            organization: rfp.organization,
            description: rfp.description,
            file_url: rfp.file_url,
            file_name: rfp.file_name,
            status: RfpStatus::Uploaded,
            clauses_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.conn.execute(
            "INSERT INTO rfps (id, title, organization, description, file_url, file_name, status,
                               clauses_count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                Self::id_to_bytes(record.id),
                &record.title,
                &record.organization,
                &record.description,
                &record.file_url,
                &record.file_name,
                record.status.as_str(),
                record.clauses_count as i64,
                record.created_at as i64,
                record.updated_at as i64,
            ],
        )?;

        debug!("Created RFP {} for '{}'", record.id, record.file_name);
        Ok(record)
    }

    fn get_rfp(&self, id: RecordId) -> Result<Option<Rfp>, Self::Error> {
        let rfp = self
            .conn
            .query_row(
                &format!("SELECT {} FROM rfps WHERE id = ?1", RFP_COLUMNS),
                params![Self::id_to_bytes(id)],
                Self::rfp_from_row,
            )
            .optional()?;
        Ok(rfp)
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM rfps ORDER BY created_at DESC, rowid DESC",
            RFP_COLUMNS
        ))?;
        let rfps = stmt
            .query_map([], Self::rfp_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rfps)
    }

    fn update_rfp_status(
        &mut self,
        id: RecordId,
        status: RfpStatus,
        clauses_count: Option<usize>,
    ) -> Result<Option<Rfp>, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE rfps
             SET status = ?2, clauses_count = COALESCE(?3, clauses_count), updated_at = ?4
             WHERE id = ?1",
            params![
                Self::id_to_bytes(id),
                status.as_str(),
                clauses_count.map(|c| c as i64),
                now_secs() as i64,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        self.get_rfp(id)
    }
}

impl ClauseStore for SqliteStore {
    type Error = StoreError;

    fn save_clauses(
        &mut self,
        rfp_id: RecordId,
        clauses: &[Clause],
    ) -> Result<Vec<StoredClause>, Self::Error> {
        let rfp_bytes = Self::id_to_bytes(rfp_id);
        let tx = self.conn.transaction()?;

        let exists = tx
            .query_row("SELECT 1 FROM rfps WHERE id = ?1", params![&rfp_bytes], |_| Ok(()))
            .optional()?
            .is_some();
        if !exists {
            return Err(StoreError::NotFound(format!("RFP {}", rfp_id)));
        }

        let now = now_secs();
        let mut stored = Vec::with_capacity(clauses.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO clauses (id, rfp_id, text, category, priority, page_number, section, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for clause in clauses {
                let id = RecordId::new();
                stmt.execute(params![
                    Self::id_to_bytes(id),
                    &rfp_bytes,
                    clause.text(),
                    clause.category().as_str(),
                    clause.priority().as_str(),
                    clause.page_number().map(i64::from),
                    clause.section(),
                    now as i64,
                ])?;
                stored.push(StoredClause {
                    id,
                    rfp_id,
                    clause: clause.clone(),
                    created_at: now,
                });
            }
        }
        tx.commit()?;

        debug!("Stored {} clauses for RFP {}", stored.len(), rfp_id);
        Ok(stored)
    }

    fn clauses_for_rfp(&self, rfp_id: RecordId) -> Result<Vec<StoredClause>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM clauses WHERE rfp_id = ?1 ORDER BY seq",
            CLAUSE_COLUMNS
        ))?;
        let clauses = stmt
            .query_map(params![Self::id_to_bytes(rfp_id)], Self::clause_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clauses)
    }

    fn all_clauses(&self) -> Result<Vec<StoredClause>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM clauses ORDER BY seq", CLAUSE_COLUMNS))?;
        let clauses = stmt
            .query_map([], Self::clause_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clauses)
    }
}
