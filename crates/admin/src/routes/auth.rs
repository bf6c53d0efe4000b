//! Admin authentication route handlers.
//!
//! Login accepts the email of an admin-role user. Customer accounts are
//! rejected the same way unknown emails are, so this surface leaks nothing
//! about which addresses exist.

use axum::extract::State;
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use ridegear_core::{Email, UserRole};

use crate::error::{AppError, Result};
use crate::models::{CurrentAdmin, session_keys};
use crate::response::success;
use crate::state::AppState;

/// Admin login body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

/// Log an admin in by email.
#[instrument(skip(state, session, req))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let email =
        Email::parse(&req.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state
        .users()
        .get_by_email(&email)
        .await?
        .filter(|u| u.role == UserRole::Admin)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let admin = CurrentAdmin::from(&user);
    session
        .insert(session_keys::CURRENT_ADMIN, admin.clone())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(admin = %admin.email, "admin logged in");
    Ok(success(admin))
}

/// Log the admin out.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(success(serde_json::json!({ "logged_out": true })))
}
