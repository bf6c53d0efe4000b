//! Authentication route handlers.
//!
//! The mock credential-less flow the original shipped: registration takes
//! an email and a display name, login takes just the email. The session
//! carries the resulting user. Registration always produces a customer;
//! nothing on this surface can mint or escalate to admin.

use axum::extract::State;
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use ridegear_core::{Email, UserRole};
use ridegear_store::NewUser;

use crate::error::{AppError, Result};
use crate::middleware::auth::OptionalUser;
use crate::models::{CurrentUser, session_keys};
use crate::response::success;
use crate::state::AppState;

/// Registration body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
}

/// Login body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

async fn establish_session(session: &Session, user: &CurrentUser) -> Result<()> {
    session
        .insert(session_keys::CURRENT_USER, user.clone())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Register a new customer account and log it in.
#[instrument(skip(state, session, req))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let email =
        Email::parse(&req.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state
        .users()
        .create(NewUser {
            email,
            name: req.name,
            role: UserRole::Customer,
        })
        .await?;

    let current = CurrentUser::from(&user);
    establish_session(&session, &current).await?;
    Ok(success(current))
}

/// Log an existing user in by email.
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
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let current = CurrentUser::from(&user);
    establish_session(&session, &current).await?;
    Ok(success(current))
}

/// Log out, keeping the cart.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(success(serde_json::json!({ "logged_out": true })))
}

/// The logged-in user, or 401.
#[instrument(skip(user))]
pub async fn me(OptionalUser(user): OptionalUser) -> Result<impl IntoResponse> {
    let user = user.ok_or_else(|| AppError::Unauthorized("Login required".to_string()))?;
    Ok(success(user))
}
