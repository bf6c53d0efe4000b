//! Account route handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::instrument;

use ridegear_store::OrderListParams;

use crate::error::Result;
use crate::middleware::auth::RequireUser;
use crate::response::success;
use crate::state::AppState;

/// Pagination for order history.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Order history for the logged-in user, newest first.
#[instrument(skip(state, user))]
pub async fn orders(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<OrdersQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .orders()
        .list(&OrderListParams {
            user_id: Some(user.id),
            status: None,
            offset: query.offset.unwrap_or(0),
            limit: query.limit.unwrap_or(0),
        })
        .await?;
    Ok(success(page))
}
