//! Classification of SQLx errors into [`StoreError`].

use crate::domain::repositories::StoreError;

/// Maps a UNIQUE constraint name to the column it guards.
fn unique_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("links_short_name_key") => "short_name",
        _ => "unknown",
    }
}

/// Converts a driver error into a [`StoreError`].
///
/// Only unique violations and missing rows are kept apart; anything else is
/// wrapped as [`StoreError::Database`].
pub fn classify(e: sqlx::Error) -> StoreError {
    if matches!(e, sqlx::Error::RowNotFound) {
        return StoreError::NotFound;
    }

    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return StoreError::UniqueViolation {
            field: unique_field(db_err.constraint()),
        };
    }

    StoreError::Database(Box::new(e))
}
