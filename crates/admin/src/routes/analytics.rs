//! Admin analytics route handler.

use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use ridegear_store::OrderListParams;

use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::services::analytics::summarize;
use crate::state::AppState;

/// Dashboard analytics: revenue, order counts, status breakdown, and the
/// top sellers, aggregated from order snapshots on every request.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let page = state
        .orders()
        .list(&OrderListParams {
            limit: usize::MAX,
            ..OrderListParams::default()
        })
        .await?;
    Ok(success(summarize(&page.items)))
}
