//! Command implementations.

pub mod clauses;
pub mod extract;
pub mod fetch;
pub mod import;
pub mod rfps;

pub use self::clauses::execute_clauses;
pub use self::extract::execute_extract;
pub use self::fetch::execute_fetch;
pub use self::import::execute_import;
pub use self::rfps::execute_rfps;
