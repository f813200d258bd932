//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    list_visits_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// JSON routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`        - List links (optionally ranged)
/// - `POST   /links`        - Create a link
/// - `GET    /links/{id}`   - Fetch a link
/// - `PUT    /links/{id}`   - Replace a link's destination and code
/// - `DELETE /links/{id}`   - Hard-delete a link
/// - `GET    /link_visits`  - List recorded visits (ranged)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/link_visits", get(list_visits_handler))
}
