//! # casefile-storage
//!
//! SQLite persistence for the Casefile graph. The [`StorageEngine`] owns
//! the connection, runs migrations on open, and implements both the
//! repository contract the presentation layer writes through and the
//! read contract the insight engine consumes.

pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::StorageEngine;

use casefile_core::errors::{CaseError, StorageError};

/// Wrap a low-level failure message into the storage error domain.
pub fn to_storage_err(message: String) -> CaseError {
    StorageError::SqliteError { message }.into()
}
