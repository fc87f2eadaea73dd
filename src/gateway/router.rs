//! Router assembly for the gateway.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::signature;
use super::state::AppState;

/// Build the gateway router.
///
/// The two platform routes sit behind the signature layer; the health
/// probe does not.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", post(handlers::slack_events))
        .route("/slack/command", post(handlers::slack_command))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            signature::require_signature,
        ))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
