//! Mirror of the Ensembl MySQL release: list, fetch, extract and import.

pub mod extract;
pub mod fetch;
pub mod import;
pub mod listing;

use crate::error::EnsemblError;

pub use extract::{extract_database, extract_file};
pub use fetch::{decompressed_name, fetch_database, FetchOutcome};
pub use import::{data_files, import_database, schema_file_name, MysqlClient};
pub use listing::{parse_index, DatabaseFilter, IndexClient, IndexEntry, Listing};

/// Database and directory names end up in SQL statements and local paths,
/// so only plain identifiers are accepted.
pub fn validate_database_name(name: &str) -> Result<&str, EnsemblError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(EnsemblError::InvalidDatabaseName(name.to_string()))
    }
}

/// File names from a remote listing must stay inside their directory.
pub(crate) fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
