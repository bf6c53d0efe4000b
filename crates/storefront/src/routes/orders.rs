//! Order confirmation lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use tracing::instrument;

use ridegear_core::OrderId;

use crate::error::{AppError, Result};
use crate::middleware::auth::OptionalUser;
use crate::response::success;
use crate::state::AppState;

/// Fetch one order for the confirmation page.
///
/// Guest orders are addressable by id alone; orders attached to a user are
/// only visible to that user (a mismatch looks like absence, not a 403).
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let order = state
        .orders()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order: {id}")))?;

    if let Some(owner) = order.user_id
        && user.as_ref().map(|u| u.id) != Some(owner)
    {
        return Err(AppError::NotFound(format!("order: {id}")));
    }

    Ok(success(order))
}
