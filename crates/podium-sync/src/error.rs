//! Error types for the sync endpoint.
//!
//! [`SyncError`] unifies the handler-level failure modes into a single
//! enum that converts into an HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur while serving a sync request.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The requested path is not part of the sync contract.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
