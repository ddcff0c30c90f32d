use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fcheck_derive::api_model;

#[api_model]
/// Error body returned by every endpoint.
pub struct ErrorResponse {
    /// Caller-safe description; internal details are only logged.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }

    /// Pairs the body with a status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
