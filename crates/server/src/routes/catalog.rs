//! Catalog route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::info;

use celushop_core::ProductRecord;
use celushop_core::normalize::normalize_catalog;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Wire shape of a successful catalog response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub count: usize,
    pub productos: Vec<ProductRecord>,
}

/// `GET /api/catalogo` - fetch, normalize and return the whole catalog.
pub async fn get_catalog(
    State(state): State<AppState>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let sheets = state.sheets().ok_or(ApiError::MissingConfig)?;

    let data = sheets.fetch_catalog().await?;
    info!(sheet = %data.title, rows = data.rows.len(), "sheet loaded");

    let productos = normalize_catalog(&data.headers, &data.rows);
    info!(
        total = data.rows.len(),
        validos = productos.len(),
        "catalog normalized"
    );

    Ok(Json(CatalogResponse {
        success: true,
        count: productos.len(),
        productos,
    }))
}

/// Bare `OPTIONS` answered with an empty 200. Preflight requests never
/// reach this handler - the CORS layer intercepts them.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Every method except GET/OPTIONS.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_owned(),
            message: None,
        }),
    )
}
