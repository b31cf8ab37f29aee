//! Axum-specific error types and mappings.
//!
//! Maps publish failures and multipart problems to HTTP status codes with a
//! JSON `{error, status}` body.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bridge_core::PublishError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (malformed body, missing part).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload exceeded the configured body limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<PublishError> for HttpError {
    fn from(err: PublishError) -> Self {
        error!("Publish failed: {err}");
        Self::Internal(err.to_string())
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(err.body_text())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}

impl From<MultipartRejection> for HttpError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_publish_error_is_internal() {
        let err = PublishError::PrepareDir {
            path: PathBuf::from("/nope"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let response = HttpError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HttpError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HttpError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HttpError::PayloadTooLarge("x".into())
                .into_response()
                .status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
