//! Schema reset: empty every data table and reseed the sentinel location.
//!
//! Runs inside the caller's transaction. Nothing here commits or rolls back.

use rmdb_catalog::LocationRecord;
use rusqlite::Connection;

use crate::procedures::{self, OperationError, ProcedureCall};
use crate::schema::Table;

/// Delete order: children before parents. Reversing it violates the
/// foreign keys from `character` and `character_in_episode`.
pub const CLEAR_ORDER: [Table; 4] = [
    Table::CharacterInEpisode,
    Table::Character,
    Table::Episode,
    Table::Location,
];

/// Delete all rows from the four data tables in [`CLEAR_ORDER`].
///
/// Stops at the first failing delete.
pub fn clear_tables(conn: &Connection) -> Result<(), OperationError> {
    for table in CLEAR_ORDER {
        let removed = conn
            .execute(&format!("DELETE FROM {}", table.ident()), [])
            .map_err(|source| OperationError::Clear {
                table: table.name(),
                source,
            })?;
        log::debug!("Cleared table '{}' ({} rows)", table.name(), removed);
    }
    Ok(())
}

/// Insert the `(0, "unknown")` location through `add_location`.
pub fn seed_unknown_location(conn: &Connection) -> Result<(), OperationError> {
    let mut call = ProcedureCall::prepare(conn)?;
    procedures::add_location(&mut call, &LocationRecord::unknown())
}

/// Clear every data table, then seed the sentinel location.
pub fn reset(conn: &Connection) -> Result<(), OperationError> {
    clear_tables(conn)?;
    seed_unknown_location(conn)?;
    log::debug!("Schema reset complete");
    Ok(())
}
