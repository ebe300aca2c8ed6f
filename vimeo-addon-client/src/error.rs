//! Vimeo client error types
//!
//! Pure client errors, no dependency on the addon layer.

use serde_json::Value;
use thiserror::Error;

/// Maximum response body size for upstream HTTP calls (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Error type for the Vimeo HTTP client.
#[derive(Debug, Error)]
pub enum VimeoError {
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream answered with a status >= 400. `payload` is the decoded
    /// response body (JSON value, or a JSON string for text bodies), untouched.
    #[error("Upstream error {status}: {payload}")]
    Upstream {
        status: reqwest::StatusCode,
        payload: Value,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

impl VimeoError {
    /// Upstream status code, when the error came from an upstream response.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VimeoError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for VimeoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for VimeoError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<url::ParseError> for VimeoError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidConfig(format!("invalid url: {err}"))
    }
}
