//! Admin order route handlers.
//!
//! Orders are never edited here beyond their status; the item snapshot is
//! immutable from creation.

use axum::extract::{Path, Query, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use ridegear_core::{OrderId, OrderStatus};
use ridegear_store::OrderListParams;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::services::events::EventKind;
use crate::state::AppState;

/// Filter and pagination query for the order list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Status change body.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// List orders, newest first, optionally filtered by status.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .orders()
        .list(&OrderListParams {
            status: query.status,
            user_id: None,
            offset: query.offset.unwrap_or(0),
            limit: query.limit.unwrap_or(0).min(100),
        })
        .await?;
    Ok(success(page))
}

/// Order detail by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let order = state
        .orders()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order: {id}")))?;
    Ok(success(order))
}

/// Move an order along the status machine.
///
/// Illegal jumps are a 400, per the route contract; the store enforces the
/// same rule underneath.
#[instrument(skip(_admin, state))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(req): Json<StatusRequest>,
) -> Result<impl IntoResponse> {
    let order = state
        .orders()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order: {id}")))?;

    if !order.status.can_transition_to(req.status) {
        return Err(AppError::BadRequest(format!(
            "cannot move order from {} to {}",
            order.status, req.status
        )));
    }

    let order = state.orders().update_status(id, req.status).await?;

    state
        .events()
        .publish(
            EventKind::OrderPlaced,
            format!("Order {} moved to {}", order.number, order.status),
        )
        .await;

    Ok(success(order))
}
