//! Unified error handling for the admin API.
//!
//! Mirrors the storefront's mapping: 400 validation/bad request, 401 auth,
//! 404 not found, 409 unique-index conflicts, 500 everything internal.
//! Server errors are captured to Sentry before the response is built.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use ridegear_store::StoreError;

use crate::response::error_body;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Request body failed schema validation.
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Admin is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Store(StoreError::NotFound) | Self::NotFound(_) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            Self::Store(StoreError::Conflict(_)) => (StatusCode::CONFLICT, "conflict"),
            Self::Store(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let message = match &self {
            Self::Store(StoreError::NotFound) => "Resource not found".to_string(),
            Self::Store(StoreError::Conflict(msg)) => msg.clone(),
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(_) => "Request validation failed".to_string(),
            _ => self.to_string(),
        };

        let fields = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        (status, Json(error_body(code, &message, fields))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
