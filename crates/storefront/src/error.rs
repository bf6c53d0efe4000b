//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; the `IntoResponse` impl maps each variant onto the
//! conventional status codes (400 validation, 401 auth, 402 payment
//! declined, 404 not found, 500 generic) and the error envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use ridegear_store::StoreError;

use crate::response::error_body;

/// Application-level error type for the storefront.
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

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Simulated payment authorization failure.
    #[error("Payment declined")]
    PaymentDeclined,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // NotFound/Conflict from the store are caller errors, not 500s.
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
            Self::PaymentDeclined => (StatusCode::PAYMENT_REQUIRED, "payment_declined"),
        };

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(StoreError::NotFound) => "Resource not found".to_string(),
            Self::Store(StoreError::Conflict(msg)) => msg.clone(),
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(_) => "Request validation failed".to_string(),
            Self::PaymentDeclined => "Payment was declined".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn status_codes_match_the_envelope_contract() {
        assert_eq!(
            status_of(AppError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::Conflict("dup".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::PaymentDeclined),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
