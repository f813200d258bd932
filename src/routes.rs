//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /ping`       - Liveness check
//! - `GET  /health`     - Health check that pings the database
//! - `GET  /r/{code}`   - Short link redirect
//! - `/api/*`           - JSON API for links and visits
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Exact-origin allow list, exposes `Content-Range`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, ping_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes bound to `state`, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/r/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
}

/// Routes wrapped in CORS and tracing layers.
fn layered_router(state: AppState, allowed_origins: &[String]) -> Router {
    router(state)
        .layer(cors::layer(allowed_origins))
        .layer(tracing::layer())
}

/// Constructs the application service with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allowed_origins` - exact origins accepted by CORS
pub fn app_router(state: AppState, allowed_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(layered_router(state, allowed_origins))
}
