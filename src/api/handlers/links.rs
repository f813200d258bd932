//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::dto::link::{LinkRequest, LinkResponse};
use crate::api::dto::list::ListParams;
use crate::api::extract::{ListQuery, ValidatedJson};
use crate::application::services::LinkListing;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links.
///
/// # Endpoint
///
/// `GET /api/links?range=[from,to]&sort=...&filter=...`
///
/// Without a `range` every link is returned. The `Content-Range` header
/// always describes the rows in the body, e.g. `links 0-9/42` or `links */42`.
///
/// # Errors
///
/// Returns 400 Bad Request if the range is malformed, negative or reversed.
pub async fn list_links_handler(
    State(state): State<AppState>,
    ListQuery(params): ListQuery<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let listing = match params.raw_range() {
        Some(raw) => LinkListing::Range(params.range_query(raw)?),
        None => LinkListing::All,
    };

    let page = state.link_service.list_links(listing).await?;
    let page = page.map(|link| {
        let short_url = state.link_service.short_url(&link.short_name);
        LinkResponse::new(link, short_url)
    });

    Ok(([(header::CONTENT_RANGE, page.content_range)], Json(page.items)))
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/long-url", "short_name": "exmpl" }
/// ```
///
/// `short_name` is optional; when absent or blank a 7-character code is
/// generated.
///
/// # Errors
///
/// - 400 if the body is malformed or fails validation
/// - 409 if `short_name` is already in use
/// - 500 if no free code could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .create_link(payload.original_url, payload.short_name)
        .await?;

    tracing::info!(id = link.id, short_name = %link.short_name, "Link created");

    let short_url = state.link_service.short_url(&link.short_name);
    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}

/// Fetches a link by id.
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state.link_service.get_link(id).await?;

    let short_url = state.link_service.short_url(&link.short_name);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Replaces a link's destination and optionally its code.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// Same body as create. A blank or absent `short_name` keeps the current code.
///
/// # Errors
///
/// - 400 on a bad id or body
/// - 404 if the link does not exist
/// - 409 if the new code belongs to another link
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state
        .link_service
        .update_link(id, payload.original_url, payload.short_name)
        .await?;

    let short_url = state.link_service.short_url(&link.short_name);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Hard-deletes a link and, through the foreign key, its visits.
///
/// `DELETE /api/links/{id}` → 204, or 404 if nothing was deleted.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.link_service.delete_link(id).await?;

    tracing::info!(id, "Link deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Parses a path id. Only positive integers are accepted.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request("Invalid id", json!({ "id": raw }))),
    }
}
