//! Clauses command implementation.

use crate::cli::ClausesArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use curio_domain::{ClauseStore, RecordId, RfpStore, StoredClause};
use curio_store::SqliteStore;

/// Execute the clauses command.
pub fn execute_clauses(args: ClausesArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let clauses = list_clauses(store, args.rfp_id.as_deref())?;
    println!("{}", formatter.format_stored_clauses(&clauses)?);
    Ok(())
}

/// Stored clauses, optionally only those of one RFP.
///
/// Naming an RFP that does not exist is `NotFound`.
pub fn list_clauses(store: &SqliteStore, rfp_id: Option<&str>) -> Result<Vec<StoredClause>> {
    match rfp_id {
        Some(id) => {
            let id: RecordId = id
                .parse()
                .map_err(|e| CliError::InvalidInput(format!("Invalid RFP id '{}': {}", id, e)))?;
            if store.get_rfp(id)?.is_none() {
                return Err(CliError::NotFound(format!("RFP {}", id)));
            }
            Ok(store.clauses_for_rfp(id)?)
        }
        None => Ok(store.all_clauses()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_domain::{Category, Clause, NewRfp, Priority};

    #[test]
    fn test_invalid_rfp_id() {
        let store = SqliteStore::new(":memory:").unwrap();
        let err = list_clauses(&store, Some("not-an-id")).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_store() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert!(list_clauses(&store, None).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_rfp() {
        let store = SqliteStore::new(":memory:").unwrap();
        let id = RecordId::new().to_string();
        let err = list_clauses(&store, Some(&id)).unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }

    #[test]
    fn test_clauses_of_one_rfp() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let rfp = store
            .create_rfp(NewRfp {
                title: "CPR Training".to_string(),
                organization: String::new(),
                description: String::new(),
                file_url: "/files/uploads/1-cpr.pdf".to_string(),
                file_name: "cpr.pdf".to_string(),
            })
            .unwrap();
        let clause = Clause::new(
            "Training must include CPR certification for 4 hours",
            Category::Duration,
            Priority::Must,
        );
        store.save_clauses(rfp.id, &[clause.clone()]).unwrap();

        let listed = list_clauses(&store, Some(&rfp.id.to_string())).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].clause, clause);
    }
}
