//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`rr_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on library calls.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: rr_core::Error,
}

impl AppError {
    pub fn new(inner: rr_core::Error) -> Self {
        Self { inner }
    }
}

impl From<rr_core::Error> for AppError {
    fn from(e: rr_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in handler"
            );
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request rejected");
        }

        // 416 carries the current size and no body.
        if let rr_core::Error::RangeNotSatisfiable { size, .. } = &self.inner {
            return (
                status,
                [
                    (header::CONTENT_RANGE, format!("bytes */{size}")),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
                Body::empty(),
            )
                .into_response();
        }

        let code = match &self.inner {
            rr_core::Error::OutOfBounds { .. } => "forbidden",
            rr_core::Error::NotFound { .. } => "not_found",
            rr_core::Error::RangeNotSatisfiable { .. } => "range_not_satisfiable",
            rr_core::Error::Validation(_) => "validation_error",
            rr_core::Error::Io { .. } => "io_error",
            rr_core::Error::Internal(_) => "internal_error",
        };

        // Do not echo resolved filesystem details back to the client.
        let message = match &self.inner {
            rr_core::Error::OutOfBounds { .. } => "Forbidden".to_string(),
            rr_core::Error::Io { .. } | rr_core::Error::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
