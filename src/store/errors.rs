//! # Store Errors
//!
//! Error types for the persistence layer. Store failures are surfaced
//! as 5xx by the API layer; they are never swallowed there.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// In-memory store lock poisoned
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
