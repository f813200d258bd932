//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService, VisitService};
use crate::domain::repositories::{LinkRepository, VisitRepository};

/// Services built once at startup and shared by all requests.
///
/// Cloning is cheap: every field is reference counted or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub visit_service: Arc<VisitService>,
    /// Trust proxy headers when resolving the visitor address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        visit_repository: Arc<dyn VisitRepository>,
        base_url: &str,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone(), base_url)),
            redirect_service: Arc::new(RedirectService::new(
                link_repository,
                visit_repository.clone(),
            )),
            visit_service: Arc::new(VisitService::new(visit_repository)),
            behind_proxy,
        }
    }
}
