//! API error types and handling.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rinse::RinseError;
use serde::Serialize;
use tracing::{error, warn};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Request body exceeded the configured limit.
    PayloadTooLarge(String),
    /// Error from the rinse library.
    Rinse(RinseError),
}

/// `{"error": "<message>"}`
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Rinse(e) if e.is_client_fault() => StatusCode::BAD_REQUEST,
            ApiError::Rinse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => msg,
            ApiError::Rinse(e) => e.to_string(),
        };

        if status.is_server_error() {
            error!(%status, "{}", message);
        } else {
            warn!(%status, "{}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<RinseError> for ApiError {
    fn from(err: RinseError) -> Self {
        ApiError::Rinse(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::Rinse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}
