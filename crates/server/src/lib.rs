//! Celushop server library.
//!
//! This crate provides the catalog API as a library, allowing it to be
//! tested and reused. The binary in `main.rs` is a thin wrapper.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod sheets;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not touch the Sheets
/// backend.
async fn health() -> &'static str {
    "ok"
}
