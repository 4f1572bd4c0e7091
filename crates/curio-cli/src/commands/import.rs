//! Import command implementation.

use crate::cli::ImportArgs;
use crate::commands::extract::file_name_of;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use curio_domain::{ClauseStore, DocumentStorage, NewRfp, Rfp, RfpStatus, RfpStore};
use curio_extractor::Extractor;
use curio_store::{FileStorage, SqliteStore};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Execute the import command.
pub async fn execute_import(
    args: ImportArgs,
    config: &Config,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let storage = FileStorage::new(&config.storage_dir)?;
    let extractor = Extractor::new(config.extractor_config(args.flags.strict, args.flags.pages))?;

    let details = RfpDetails {
        title: args.title,
        organization: args.organization,
        description: args.description,
    };
    let rfp = import_file(&args.path, details, store, &storage, &extractor).await?;

    if formatter.is_quiet() {
        println!("{}", formatter.format_rfp(&rfp)?);
    } else {
        println!(
            "{}",
            formatter.success(&format!(
                "Imported '{}' with {} clause(s)",
                rfp.title, rfp.clauses_count
            ))
        );
        println!("{}", formatter.format_rfp(&rfp)?);
    }
    Ok(())
}

/// Descriptive fields of an imported RFP.
#[derive(Debug, Clone, Default)]
pub struct RfpDetails {
    /// Title; the file name is used when empty
    pub title: String,
    /// Issuing organization
    pub organization: String,
    /// Free-form description
    pub description: String,
}

/// Copy a document into storage, register it as an RFP and store its clauses.
///
/// The RFP is created before parsing. If extraction fails it is kept with
/// status `error` and the extraction error is returned.
pub async fn import_file(
    path: &Path,
    details: RfpDetails,
    store: &mut SqliteStore,
    storage: &FileStorage,
    extractor: &Extractor,
) -> Result<Rfp> {
    let file_name = file_name_of(path)?;
    let payload = fs::read(path)?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let saved = storage.save_upload(&payload, &format!("{}-{}", millis, file_name))?;

    let rfp = store.create_rfp(NewRfp {
        title: details.title,
        organization: details.organization,
        description: details.description,
        file_url: saved.url,
        file_name,
    })?;

    match extractor.extract_offloaded(payload, &rfp.file_name).await {
        Ok(result) => {
            let stored = store.save_clauses(rfp.id, &result.clauses)?;
            store
                .update_rfp_status(rfp.id, RfpStatus::Parsed, Some(stored.len()))?
                .ok_or_else(|| CliError::NotFound(format!("RFP {}", rfp.id)))
        }
        Err(e) => {
            warn!("Parsing RFP {} failed: {}", rfp.id, e);
            store.update_rfp_status(rfp.id, RfpStatus::Error, None)?;
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_extractor::{ExtractorConfig, ExtractorError};

    fn setup() -> (tempfile::TempDir, SqliteStore, FileStorage, Extractor) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(":memory:").unwrap();
        let storage = FileStorage::new(dir.path().join("storage")).unwrap();
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        (dir, store, storage, extractor)
    }

    #[tokio::test]
    async fn test_import_unsupported_file_is_parsed_empty() {
        let (dir, mut store, storage, extractor) = setup();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "The vendor must supply every training mannequin").unwrap();

        let rfp = import_file(&path, RfpDetails::default(), &mut store, &storage, &extractor)
            .await
            .unwrap();

        assert_eq!(rfp.title, "notes.txt");
        assert_eq!(rfp.status, RfpStatus::Parsed);
        assert_eq!(rfp.clauses_count, 0);
        assert!(rfp.file_url.ends_with("-notes.txt"));
        assert!(storage.read_url(&rfp.file_url).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_import_failure_marks_rfp_as_error() {
        let (dir, mut store, storage, extractor) = setup();
        let path = dir.path().join("bundle.zip");
        fs::write(&path, b"not a zip").unwrap();

        let details = RfpDetails {
            title: "Broken bundle".to_string(),
            ..Default::default()
        };
        let err = import_file(&path, details, &mut store, &storage, &extractor)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Extractor(ExtractorError::InvalidArchive(_))
        ));

        let rfps = store.list_rfps().unwrap();
        assert_eq!(rfps.len(), 1);
        assert_eq!(rfps[0].title, "Broken bundle");
        assert_eq!(rfps[0].status, RfpStatus::Error);
        assert!(store.clauses_for_rfp(rfps[0].id).unwrap().is_empty());
    }
}
