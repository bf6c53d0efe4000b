//! Admin event feed route handlers.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::state::AppState;

/// The buffered notifications, newest first.
#[instrument(skip(_admin, state))]
pub async fn recent(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    Ok(success(state.events().recent().await))
}

/// Live event stream over SSE.
///
/// A consumer that falls behind the broadcast channel skips ahead to the
/// newest events rather than erroring out.
#[instrument(skip(_admin, state))]
pub async fn stream(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut rx = state.events().subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Ok(json) = serde_json::to_string(&event) {
                        yield Ok(Event::default().event(event.kind.as_str()).data(json));
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
