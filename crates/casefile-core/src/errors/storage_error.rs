/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("record not found: {id}")]
    NotFound { id: String },

    #[error("malformed record in {table} (id {id}): {reason}")]
    MalformedRecord {
        table: String,
        id: String,
        reason: String,
    },
}
