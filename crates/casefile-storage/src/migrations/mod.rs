//! Schema migrations, applied in order on engine startup.
//! Each migration is idempotent (`CREATE TABLE IF NOT EXISTS`), so
//! re-running the full list against an existing database is safe.

pub mod v001_core_tables;

use rusqlite::Connection;

use casefile_core::errors::CaseResult;

pub fn run_migrations(conn: &Connection) -> CaseResult<()> {
    v001_core_tables::migrate(conn)?;
    Ok(())
}
