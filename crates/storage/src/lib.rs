//! Storage Layer
//!
//! Provides SQLite persistence with repository pattern.

mod repository;

pub use repository::{ConsumptionRecord, ConsumptionStore};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Engine-level failure. Carries the underlying message verbatim so the
    /// API layer can forward it unchanged.
    #[error("{0}")]
    Database(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}
