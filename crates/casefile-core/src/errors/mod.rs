//! Error taxonomy. One enum per domain, aggregated into [`CaseError`].

pub mod insight_error;
pub mod storage_error;

pub use insight_error::InsightError;
pub use storage_error::StorageError;

/// Workspace-wide result alias.
pub type CaseResult<T> = Result<T, CaseError>;

/// Aggregate error type crossing crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Insight(#[from] InsightError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
