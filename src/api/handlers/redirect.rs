//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::extract::ClientMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Request Flow
///
/// 1. Look up the code (blank or unknown → 404)
/// 2. Record one visit with client IP, `User-Agent` and `Referer`
/// 3. Return 302 Found with the stored URL in `Location`
///
/// A failed visit insert is logged and does not affect the response.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ClientMeta(visit): ClientMeta,
) -> Result<impl IntoResponse, AppError> {
    let target = state.redirect_service.resolve(&code, visit).await?;

    let location = HeaderValue::from_str(&target).map_err(|_| {
        tracing::error!(code = %code, "Stored URL is not a valid Location header");
        AppError::internal("Invalid redirect target", json!({}))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
