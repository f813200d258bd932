//! Handler for the visit log.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};

use crate::api::dto::list::{ListParams, non_blank};
use crate::api::dto::visit::LinkVisitResponse;
use crate::api::extract::ListQuery;
use crate::application::services::visit_service::DEFAULT_VISITS_RANGE;
use crate::domain::range::{RangeError, RangeQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded visits in id order.
///
/// # Endpoint
///
/// `GET /api/link_visits`
///
/// # Range Selection
///
/// 1. `Range` header, e.g. `Range: [0,10]`
/// 2. `range` query parameter
/// 3. `[0,10]`
///
/// Blank values fall through to the next source. A `sort` or `filter` query
/// parameter makes the upper bound inclusive.
///
/// # Errors
///
/// Returns 400 Bad Request if the selected range is invalid, including a
/// `Range` header that is not visible ASCII.
pub async fn list_visits_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ListQuery(params): ListQuery<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let header_range = match headers.get(header::RANGE) {
        Some(value) => non_blank(Some(value.to_str().map_err(|_| RangeError::Malformed)?)),
        None => None,
    };

    let query = match header_range.or(params.raw_range()) {
        Some(raw) => params.range_query(raw)?,
        None => RangeQuery::new(DEFAULT_VISITS_RANGE, params.is_inclusive()),
    };

    let page = state
        .visit_service
        .list_visits(query)
        .await?
        .map(LinkVisitResponse::from);

    Ok(([(header::CONTENT_RANGE, page.content_range)], Json(page.items)))
}
