//! Custom extractors shared by the API handlers.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Query, Request},
    http::{HeaderMap, HeaderName, header, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::application::services::VisitContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// JSON body that has been deserialized and validated.
///
/// Malformed bodies and failed validation both become
/// [`AppError::Validation`], so every 400 shares the same error shape.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid request body",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// Query string deserialized into `T`.
///
/// Unlike [`Query`], a rejection becomes [`AppError::Validation`] so a bad
/// query string gets the JSON error body.
#[derive(Debug)]
pub struct ListQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid query string",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        Ok(Self(value))
    }
}

/// Visitor metadata for the redirect endpoint.
///
/// Missing headers and an unknown peer address yield empty strings.
#[derive(Debug)]
pub struct ClientMeta(pub VisitContext);

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(Self(VisitContext {
            ip: client_ip(&parts.headers, peer, state.behind_proxy),
            user_agent: header_string(&parts.headers, header::USER_AGENT),
            referer: header_string(&parts.headers, header::REFERER),
        }))
    }
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
