//! Error types for the log server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Log Error Enum ==
/// Unified error type for the log server.
#[derive(Error, Debug)]
pub enum LogError {
    /// Requested log file is missing or is not a regular file
    #[error("{0}")]
    NotFound(String),

    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// The request deadline elapsed before the scan finished
    #[error("Request timed out after {0} ms")]
    Timeout(u128),

    /// The scan observed its cancellation token and stopped early
    #[error("Scan was cancelled")]
    Cancelled,

    /// Read failure on an existing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for LogError {
    fn into_response(self) -> Response {
        let status = match &self {
            LogError::NotFound(_) => StatusCode::NOT_FOUND,
            LogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LogError::Timeout(_) | LogError::Cancelled => StatusCode::GATEWAY_TIMEOUT,
            LogError::Io(_) | LogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the log server.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LogError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (LogError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (LogError::Timeout(10), StatusCode::GATEWAY_TIMEOUT),
            (LogError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                LogError::Io(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            LogError::Timeout(1500).to_string(),
            "Request timed out after 1500 ms"
        );
    }
}
