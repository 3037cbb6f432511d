//! Dresser web frontend library.
//!
//! Server-rendered wardrobe app: outfit generation, a featured random
//! outfit, outfit selection, and item uploads, all backed by the wardrobe
//! API. Exposed as a library so the integration tests can assemble the same
//! router the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod wardrobe;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Assemble the full application router, session layer included.
///
/// Sentry and static-file layers are the binary's concern; everything the
/// app's behavior depends on is wired here.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
