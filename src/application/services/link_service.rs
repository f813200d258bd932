//! Link creation, retrieval, update and listing service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, LinkChanges, NewLink};
use crate::domain::range::{Page, RangeQuery};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Resource name used in `Content-Range` values for links.
pub const LINKS_RESOURCE: &str = "links";

/// Upper bound on random code candidates tried for a single create.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// How the link collection should be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkListing {
    /// No range requested: every row is returned.
    All,
    /// A client-selected slice.
    Range(RangeQuery),
}

/// Service for creating and managing short links.
///
/// Short codes are either supplied by the client or generated with bounded
/// retries. Uniqueness is left to the store: a conflicting insert is the
/// only collision signal, there is no check-then-act.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service. Trailing slashes of `base_url` are dropped.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            link_repository,
            base_url,
        }
    }

    /// Public URL that redirects to the link with `short_name`.
    pub fn short_url(&self, short_name: &str) -> String {
        format!("{}/r/{}", self.base_url, short_name)
    }

    /// Creates a link.
    ///
    /// A non-blank `short_name` (after trimming) is inserted as-is exactly
    /// once; otherwise a code is generated.
    ///
    /// # Errors
    ///
    /// - [`AppError::Conflict`] if the explicit code is already in use
    /// - [`AppError::GenerationExhausted`] if every generated code collided
    /// - [`AppError::Internal`] on storage failures
    pub async fn create_link(
        &self,
        original_url: String,
        short_name: Option<String>,
    ) -> Result<Link, AppError> {
        match normalize_short_name(short_name) {
            Some(short_name) => {
                let link = self
                    .link_repository
                    .create(NewLink {
                        original_url,
                        short_name,
                    })
                    .await?;
                Ok(link)
            }
            None => self.create_with_generated_code(original_url).await,
        }
    }

    /// Inserts the link under a fresh random code, retrying on code collisions.
    async fn create_with_generated_code(&self, original_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let short_name = generate_code().map_err(|e| {
                tracing::error!(error = %e, "System random number generator failed");
                AppError::internal("Failed to generate short_name", json!({}))
            })?;

            let new_link = NewLink {
                original_url: original_url.clone(),
                short_name,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(e) if e.is_unique_violation_on("short_name") => {
                    tracing::debug!(attempt, "Generated short_name collided, retrying");
                    metrics::counter!("shorty_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Exhausted short_name generation attempts"
        );
        metrics::counter!("shorty_code_generation_exhausted_total").increment(1);

        Err(AppError::generation_exhausted(MAX_GENERATION_ATTEMPTS))
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| link_not_found(id))
    }

    /// Replaces the destination and, when given, the code of a link.
    ///
    /// A blank or absent `short_name` keeps the current code.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this id
    /// - [`AppError::Conflict`] if the new code belongs to another link
    pub async fn update_link(
        &self,
        id: i64,
        original_url: String,
        short_name: Option<String>,
    ) -> Result<Link, AppError> {
        let short_name = match normalize_short_name(short_name) {
            Some(short_name) => short_name,
            None => self.get_link(id).await?.short_name,
        };

        let changes = LinkChanges {
            original_url,
            short_name,
        };

        match self.link_repository.update(id, changes).await {
            Ok(link) => Ok(link),
            Err(StoreError::NotFound) => Err(link_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Hard-deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row was deleted.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if self.link_repository.delete(id).await? {
            Ok(())
        } else {
            Err(link_not_found(id))
        }
    }

    /// Counts all links. Used by the health check.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        Ok(self.link_repository.count().await?)
    }

    /// Lists links together with their `Content-Range` value.
    ///
    /// The total is counted fresh on every call. Count and page are separate
    /// queries, so concurrent writes may make them disagree.
    pub async fn list_links(&self, listing: LinkListing) -> Result<Page<Link>, AppError> {
        let total = self.link_repository.count().await?;

        match listing {
            LinkListing::All => {
                let links = self.link_repository.list_all().await?;
                Ok(Page::new(LINKS_RESOURCE, 0, links, total))
            }
            LinkListing::Range(query) => {
                let Some(window) = query.window(total)? else {
                    return Ok(Page::empty(LINKS_RESOURCE, total));
                };

                let links = self
                    .link_repository
                    .list_range(window.offset, window.limit)
                    .await?;
                Ok(Page::new(LINKS_RESOURCE, window.offset, links, total))
            }
        }
    }
}

/// Trims a client-supplied code, mapping blank input to `None`.
fn normalize_short_name(short_name: Option<String>) -> Option<String> {
    short_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn link_not_found(id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::range::RangeDescriptor;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::{CODE_LENGTH, is_valid_short_name};
    use mockall::predicate::eq;

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), "https://short.io/")
    }

    fn code_conflict() -> StoreError {
        StoreError::UniqueViolation {
            field: "short_name",
        }
    }

    fn links(from: i64, n: i64) -> Vec<Link> {
        (from..from + n)
            .map(|i| Link::new(i + 1, format!("https://example.com/{i}"), format!("code{i}")))
            .collect()
    }

    #[test]
    fn test_short_url_uses_trimmed_base() {
        let service = service(MockLinkRepository::new());
        assert_eq!(service.short_url("abc"), "https://short.io/r/abc");
    }

    #[tokio::test]
    async fn test_create_with_explicit_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .withf(|new_link| new_link.short_name == "abc")
            .times(1)
            .returning(|new_link| Ok(Link::new(1, new_link.original_url, new_link.short_name)));

        let link = service(repo)
            .create_link("https://example.com".to_string(), Some("  abc ".to_string()))
            .await
            .unwrap();

        assert_eq!(link.short_name, "abc");
    }

    #[tokio::test]
    async fn test_explicit_code_conflict_is_not_retried() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(code_conflict()));

        let result = service(repo)
            .create_link("https://example.com".to_string(), Some("abc".to_string()))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(err.to_string().contains("short_name"));
    }

    #[tokio::test]
    async fn test_generated_code_shape() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .withf(|new_link| {
                new_link.short_name.len() == CODE_LENGTH
                    && new_link.short_name.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|new_link| Ok(Link::new(1, new_link.original_url, new_link.short_name)));

        let link = service(repo)
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert!(is_valid_short_name(&link.short_name));
    }

    #[tokio::test]
    async fn test_blank_code_is_generated() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .withf(|new_link| new_link.short_name.len() == CODE_LENGTH)
            .times(1)
            .returning(|new_link| Ok(Link::new(1, new_link.original_url, new_link.short_name)));

        let result = service(repo)
            .create_link("https://example.com".to_string(), Some("   ".to_string()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generation_retries_after_collision() {
        let mut repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_create()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|_| Err(code_conflict()));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(Link::new(9, new_link.original_url, new_link.short_name)));

        let link = service(repo)
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.id, 9);
    }

    #[tokio::test]
    async fn test_generation_exhausted_after_ten_conflicts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Err(code_conflict()));

        let result = service(repo)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::GenerationExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_generation_stops_on_storage_failure() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Database("connection reset".into())));

        let result = service(repo)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repo).get_link(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_keeps_existing_code_when_blank() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|id| Ok(Some(Link::new(id, "https://old.com".into(), "keep".into()))));
        repo.expect_update()
            .withf(|id, changes| *id == 5 && changes.short_name == "keep")
            .times(1)
            .returning(|id, changes| Ok(Link::new(id, changes.original_url, changes.short_name)));

        let link = service(repo)
            .update_link(5, "https://new.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.short_name, "keep");
        assert_eq!(link.original_url, "https://new.com");
    }

    #[tokio::test]
    async fn test_update_with_new_code_skips_lookup() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id().times(0);
        repo.expect_update()
            .withf(|_, changes| changes.short_name == "fresh")
            .times(1)
            .returning(|id, changes| Ok(Link::new(id, changes.original_url, changes.short_name)));

        let result = service(repo)
            .update_link(5, "https://new.com".to_string(), Some("fresh".to_string()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update()
            .times(1)
            .returning(|_, _| Err(StoreError::NotFound));

        let result = service(repo)
            .update_link(5, "https://new.com".to_string(), Some("fresh".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_code_conflict() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update()
            .times(1)
            .returning(|_, _| Err(code_conflict()));

        let result = service(repo)
            .update_link(5, "https://new.com".to_string(), Some("taken".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(repo).delete_link(3).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_all_without_range() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().times(1).returning(|| Ok(3));
        repo.expect_list_all().times(1).returning(|| Ok(links(0, 3)));
        repo.expect_list_range().times(0);

        let page = service(repo).list_links(LinkListing::All).await.unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.content_range, "links 0-2/3");
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().times(1).returning(|| Ok(0));
        repo.expect_list_all().times(1).returning(|| Ok(vec![]));

        let page = service(repo).list_links(LinkListing::All).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.content_range, "links */0");
    }

    #[tokio::test]
    async fn test_list_range_partial_last_page() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().times(1).returning(|| Ok(12));
        repo.expect_list_range()
            .with(eq(10), eq(9))
            .times(1)
            .returning(|offset, _| Ok(links(offset, 2)));

        let query = RangeQuery::new(RangeDescriptor::new(10, 19), false);
        let page = service(repo)
            .list_links(LinkListing::Range(query))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.content_range, "links 10-11/12");
    }

    #[tokio::test]
    async fn test_list_range_inclusive_with_sort() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().times(1).returning(|| Ok(12));
        repo.expect_list_range()
            .with(eq(0), eq(10))
            .times(1)
            .returning(|offset, limit| Ok(links(offset, limit)));

        let query = RangeQuery::new(RangeDescriptor::new(0, 9), true);
        let page = service(repo)
            .list_links(LinkListing::Range(query))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.content_range, "links 0-9/12");
    }

    #[tokio::test]
    async fn test_list_range_past_end_skips_page_query() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().times(1).returning(|| Ok(4));
        repo.expect_list_range().times(0);

        let query = RangeQuery::new(RangeDescriptor::new(4, 9), false);
        let page = service(repo)
            .list_links(LinkListing::Range(query))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.content_range, "links */4");
    }
}
