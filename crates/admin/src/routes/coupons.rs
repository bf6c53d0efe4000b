//! Admin coupon route handlers.

use axum::extract::{Path, State};
use axum::{Json, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use ridegear_core::{CouponId, CouponKind};
use ridegear_store::{CouponPatch, NewCoupon};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::state::AppState;

/// Coupon creation body. `value` is percentage points for percent coupons,
/// cents for fixed ones.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCouponRequest {
    #[validate(length(min = 1))]
    pub code: String,
    pub kind: CouponKind,
    pub value: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    pub scope: Option<String>,
}

const fn default_active() -> bool {
    true
}

/// Partial coupon update body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCouponRequest {
    pub kind: Option<CouponKind>,
    pub value: Option<Decimal>,
    pub active: Option<bool>,
    pub scope: Option<String>,
}

fn validate_value(kind: CouponKind, value: Decimal) -> Result<()> {
    if value.is_sign_negative() {
        return Err(AppError::BadRequest("value must not be negative".to_string()));
    }
    if kind == CouponKind::Percent && value > Decimal::from(100) {
        return Err(AppError::BadRequest(
            "percent coupons cannot exceed 100".to_string(),
        ));
    }
    Ok(())
}

/// List all coupons.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    Ok(success(state.coupons().list().await?))
}

/// Coupon detail by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
) -> Result<impl IntoResponse> {
    let coupon = state
        .coupons()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("coupon: {id}")))?;
    Ok(success(coupon))
}

/// Create a coupon. Duplicate codes are a 409.
#[instrument(skip(_admin, state, req))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateCouponRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    validate_value(req.kind, req.value)?;

    let coupon = state
        .coupons()
        .create(NewCoupon {
            code: req.code,
            kind: req.kind,
            value: req.value,
            active: req.active,
            scope: req.scope,
        })
        .await?;
    Ok(success(coupon))
}

/// Merge a partial update onto a coupon.
#[instrument(skip(_admin, state, req))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
    Json(req): Json<UpdateCouponRequest>,
) -> Result<impl IntoResponse> {
    if let (Some(kind), Some(value)) = (req.kind, req.value) {
        validate_value(kind, value)?;
    }

    let coupon = state
        .coupons()
        .update(
            id,
            CouponPatch {
                kind: req.kind,
                value: req.value,
                active: req.active,
                scope: req.scope.map(Some),
            },
        )
        .await?;
    Ok(success(coupon))
}

/// Delete a coupon.
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
) -> Result<impl IntoResponse> {
    if !state.coupons().remove(id).await? {
        return Err(AppError::NotFound(format!("coupon: {id}")));
    }
    Ok(success(serde_json::json!({ "deleted": true })))
}
