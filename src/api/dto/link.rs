//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;
use crate::utils::code_generator::validate_short_name;

/// Request body for `POST /api/links` and `PUT /api/links/{id}`.
///
/// A blank `short_name` is treated as absent: a code is generated on create
/// and the current code is kept on update.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkRequest {
    /// Destination URL. Stored verbatim once it parses as an absolute URL.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    #[serde(default)]
    #[validate(custom(function = "validate_short_name"))]
    pub short_name: Option<String>,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_name: link.short_name,
            short_url,
        }
    }
}
