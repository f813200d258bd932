//! Visit log listing service.

use std::sync::Arc;

use crate::domain::entities::LinkVisit;
use crate::domain::range::{Page, RangeDescriptor, RangeQuery};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// Resource name used in `Content-Range` values for visits.
pub const VISITS_RESOURCE: &str = "link_visits";

/// Range applied when the client sends none: the first ten visits.
pub const DEFAULT_VISITS_RANGE: RangeDescriptor = RangeDescriptor::new(0, 10);

/// Service for reading the visit log.
pub struct VisitService<V: VisitRepository + ?Sized = dyn VisitRepository> {
    visit_repository: Arc<V>,
}

impl<V: VisitRepository + ?Sized> VisitService<V> {
    /// Creates a new visit service.
    pub fn new(visit_repository: Arc<V>) -> Self {
        Self { visit_repository }
    }

    /// Lists a slice of the visit log together with its `Content-Range` value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid range and
    /// [`AppError::Internal`] on storage failures.
    pub async fn list_visits(&self, query: RangeQuery) -> Result<Page<LinkVisit>, AppError> {
        let total = self.visit_repository.count().await?;

        let Some(window) = query.window(total)? else {
            return Ok(Page::empty(VISITS_RESOURCE, total));
        };

        let visits = self
            .visit_repository
            .list_range(window.offset, window.limit)
            .await?;

        Ok(Page::new(VISITS_RESOURCE, window.offset, visits, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockVisitRepository, StoreError};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn visits(offset: i64, n: i64) -> Vec<LinkVisit> {
        (offset..offset + n)
            .map(|i| LinkVisit {
                id: i + 1,
                link_id: 1,
                created_at: Utc::now(),
                ip: "10.0.0.1".to_string(),
                user_agent: "ua".to_string(),
                referer: String::new(),
                status: 302,
            })
            .collect()
    }

    /// Repository over `total` visits that serves whatever window is asked.
    fn repo_with(total: i64) -> MockVisitRepository {
        let mut repo = MockVisitRepository::new();
        repo.expect_count().returning(move || Ok(total));
        repo.expect_list_range().returning(move |offset, limit| {
            let n = limit.min(total - offset).max(0);
            Ok(visits(offset, n))
        });
        repo
    }

    fn query(from: i64, to: i64, inclusive: bool) -> RangeQuery {
        RangeQuery::new(RangeDescriptor::new(from, to), inclusive)
    }

    #[tokio::test]
    async fn test_default_range_returns_first_ten() {
        let service = VisitService::new(Arc::new(repo_with(12)));

        let page = service
            .list_visits(RangeQuery::new(DEFAULT_VISITS_RANGE, false))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.content_range, "link_visits 0-9/12");
    }

    #[tokio::test]
    async fn test_tail_page_reports_actual_rows() {
        let service = VisitService::new(Arc::new(repo_with(12)));

        let page = service.list_visits(query(10, 19, false)).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.content_range, "link_visits 10-11/12");
    }

    #[tokio::test]
    async fn test_inclusive_span() {
        let service = VisitService::new(Arc::new(repo_with(12)));

        let page = service.list_visits(query(0, 9, true)).await.unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.content_range, "link_visits 0-9/12");
    }

    #[tokio::test]
    async fn test_refetch_is_idempotent() {
        let service = VisitService::new(Arc::new(repo_with(12)));

        let first = service.list_visits(query(2, 7, false)).await.unwrap();
        let second = service.list_visits(query(2, 7, false)).await.unwrap();

        let ids = |p: &Page<LinkVisit>| p.items.iter().map(|v| v.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.content_range, second.content_range);
    }

    #[tokio::test]
    async fn test_empty_log_skips_page_query() {
        let mut repo = MockVisitRepository::new();
        repo.expect_count().times(1).returning(|| Ok(0));
        repo.expect_list_range().times(0);

        let page = VisitService::new(Arc::new(repo))
            .list_visits(query(0, 10, false))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.content_range, "link_visits */0");
    }

    #[tokio::test]
    async fn test_window_passed_to_store() {
        let mut repo = MockVisitRepository::new();
        repo.expect_count().returning(|| Ok(50));
        repo.expect_list_range()
            .with(eq(20), eq(5))
            .times(1)
            .returning(|offset, limit| Ok(visits(offset, limit)));

        let page = VisitService::new(Arc::new(repo))
            .list_visits(query(20, 25, false))
            .await
            .unwrap();

        assert_eq!(page.content_range, "link_visits 20-24/50");
    }

    #[tokio::test]
    async fn test_count_failure_is_internal() {
        let mut repo = MockVisitRepository::new();
        repo.expect_count()
            .returning(|| Err(StoreError::Database("gone".into())));

        let result = VisitService::new(Arc::new(repo))
            .list_visits(query(0, 10, false))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
