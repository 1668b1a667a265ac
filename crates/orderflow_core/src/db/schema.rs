//! Pipeline schema definition and application.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written to `PRAGMA user_version` once applied.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = "\
CREATE TABLE users (
    name TEXT NOT NULL
);
CREATE TABLE orders (
    user_name TEXT NOT NULL
);
";

/// Applies the schema if the database is still empty, and validates the
/// version otherwise.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current = user_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            db_version: current,
            supported: SCHEMA_VERSION,
        });
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}

fn user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
