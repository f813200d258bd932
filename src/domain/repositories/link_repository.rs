//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkChanges, NewLink};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// All listing operations order rows by `id` ascending so that repeated
/// range reads without intervening writes return identical pages.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] with field `short_name` if the
    /// code is already taken.
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds a link by its identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, StoreError>;

    /// Finds a link by exact short code match.
    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, StoreError>;

    /// Replaces the URL and code of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this id and
    /// [`StoreError::UniqueViolation`] if the new code belongs to another link.
    async fn update(&self, id: i64, changes: LinkChanges) -> Result<Link, StoreError>;

    /// Hard-deletes a link. Returns `false` when no row was affected.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Lists every link.
    async fn list_all(&self) -> Result<Vec<Link>, StoreError>;

    /// Lists at most `limit` links starting at `offset`.
    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Link>, StoreError>;
}
