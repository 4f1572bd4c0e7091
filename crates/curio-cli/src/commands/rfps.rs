//! Rfps command implementation.

use crate::error::Result;
use crate::output::Formatter;
use curio_domain::RfpStore;
use curio_store::SqliteStore;

/// Execute the rfps command.
pub fn execute_rfps(store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let rfps = store.list_rfps()?;
    println!("{}", formatter.format_rfps(&rfps)?);
    Ok(())
}
