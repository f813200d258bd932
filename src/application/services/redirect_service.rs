//! Short code resolution with best-effort visit recording.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::NewLinkVisit;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Status code used for every successful redirect, and stored on each visit.
pub const REDIRECT_STATUS: u16 = 302;

/// Client metadata captured for a visit. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitContext {
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
}

/// Resolves short codes to destination URLs.
///
/// Visit recording never influences the outcome: a failed insert is logged
/// and counted, and the redirect proceeds.
pub struct RedirectService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    V: VisitRepository + ?Sized = dyn VisitRepository,
> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> RedirectService<L, V> {
    /// Creates a new redirect service.
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Looks up `code` and records a visit, returning the stored destination
    /// verbatim.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is blank or unknown
    /// - [`AppError::Internal`] if the lookup fails
    pub async fn resolve(&self, code: &str, visit: VisitContext) -> Result<String, AppError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::not_found("Link not found", json!({})));
        }

        let link = self
            .link_repository
            .find_by_short_name(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        let new_visit = NewLinkVisit {
            link_id: link.id,
            ip: visit.ip,
            user_agent: visit.user_agent,
            referer: visit.referer,
            status: i32::from(REDIRECT_STATUS),
        };

        if let Err(e) = self.visit_repository.record(new_visit).await {
            tracing::warn!(error = %e, link_id = link.id, "Failed to record link visit");
            metrics::counter!("shorty_visits_failed_total").increment(1);
        }

        metrics::counter!("shorty_redirects_total").increment(1);

        Ok(link.original_url)
    }
}
