//! Relay error types
//!
//! Every failure on the conversation route ends up as one of these variants.
//! `IntoResponse` is the only place where a variant is turned into a status
//! code and a JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    /// The upstream credential is missing or empty
    #[error("{0} is not configured")]
    Configuration(String),

    /// The requested action is absent or unrecognized
    #[error("Invalid action")]
    InvalidAction,

    /// The upstream API answered with a non-success status.
    ///
    /// Only the status code is carried; the upstream body is logged, never
    /// returned to the caller.
    #[error("Failed to get signed URL: {0}")]
    Upstream(u16),

    /// Any other fault (malformed body, network failure, parse failure)
    #[error("{0}")]
    Unexpected(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidAction => StatusCode::BAD_REQUEST,
            RelayError::Configuration(_) | RelayError::Upstream(_) | RelayError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Unexpected(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
