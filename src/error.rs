//! Error types for point store operations.

use thiserror::Error;

/// Result type alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by generation, loading, querying, and backup.
#[derive(Debug, Error)]
pub enum Error {
    /// Coordinate bounds where min does not lie below max.
    #[error("invalid coordinate bounds: min {min} is not below max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Batches must hold at least one row.
    #[error("invalid batch size: batches must hold at least one row")]
    InvalidBatchSize,

    /// Query radius must be non-negative.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// A batch insert failed. Chunks committed before the failure stay
    /// durable; `committed` counts their rows.
    #[error("batch insert failed after {committed} committed rows: {source}")]
    StorageWrite {
        committed: usize,
        source: rusqlite::Error,
    },

    /// Schema creation or query execution failed.
    #[error("storage query failed: {0}")]
    StorageQuery(#[from] rusqlite::Error),

    /// The online backup could not complete. The source store is unaffected.
    #[error("backup failed: {0}")]
    Backup(rusqlite::Error),
}
