//! Storage error classification shared by all repositories.

use thiserror::Error;

/// Errors reported by repository implementations.
///
/// Only uniqueness conflicts and missing rows are distinguished; every other
/// failure of the underlying store collapses into [`StoreError::Database`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write. `field` names the column it guards.
    #[error("unique constraint violated on `{field}`")]
    UniqueViolation { field: &'static str },

    /// The targeted row does not exist.
    #[error("row not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Returns true when the error is a uniqueness conflict on `field`.
    pub fn is_unique_violation_on(&self, field: &str) -> bool {
        matches!(self, StoreError::UniqueViolation { field: f } if *f == field)
    }
}
