// HTTP error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use vimeo_addon_client::VimeoError;
use vimeo_addon_core::AddonError;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error with HTTP status code and JSON body
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: Value,
}

/// Error response JSON structure
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let body = serde_json::to_value(ErrorResponse {
            error: message.into(),
            status: status.as_u16(),
        })
        .unwrap_or(Value::Null);
        Self { status, body }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.body)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Upstream failures keep their status and payload so the host sees exactly
/// what Vimeo answered.
impl From<AddonError> for AppError {
    fn from(err: AddonError) -> Self {
        match err {
            AddonError::Client(VimeoError::Upstream { status, payload }) => Self {
                status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
                body: payload,
            },
            AddonError::InvalidRequest(msg) => Self::bad_request(msg),
            AddonError::Client(e) => {
                tracing::error!("Vimeo client error: {}", e);
                Self::bad_gateway(e.to_string())
            }
        }
    }
}
