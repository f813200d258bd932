//! Repository trait for link visit events.

use crate::domain::entities::{LinkVisit, NewLinkVisit};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Repository interface for the append-only visit log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit. The timestamp is assigned by the database.
    async fn record(&self, new_visit: NewLinkVisit) -> Result<LinkVisit, StoreError>;

    /// Counts all recorded visits.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Lists at most `limit` visits starting at `offset`, ordered by `id`.
    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<LinkVisit>, StoreError>;
}
