//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET     /api/catalogo - Full normalized catalog
//! OPTIONS /api/catalogo - Bare 200 (preflights handled by the CORS layer)
//! *       /api/catalogo - 405 with an error body
//! ```

mod catalog;

use axum::http::{Method, header};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub use catalog::CatalogResponse;

/// Build the API router. CORS is wide open: the static frontend is served
/// from a different origin.
#[must_use]
pub fn routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/catalogo",
            get(catalog::get_catalog)
                .options(catalog::preflight)
                .fallback(catalog::method_not_allowed),
        )
        .layer(cors)
}
