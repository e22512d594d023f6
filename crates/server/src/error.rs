//! Catalog API error responses.
//!
//! Every failure class carries its own HTTP status and a localized
//! `{error, message}` body; classification happens where the error is
//! raised (see [`SheetsError`]), never by matching message text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sheets::SheetsError;

/// Application-level error type for API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Google Sheets configuration is absent; the route answers the
    /// configuration error instead of the process refusing to boot.
    #[error("configuración del servidor incompleta")]
    MissingConfig,

    /// Catalog fetch failed.
    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

/// JSON body of a non-success response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            Self::MissingConfig => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuración del servidor incompleta",
                "Faltan variables de entorno necesarias para conectar con Google Sheets"
                    .to_owned(),
            ),
            Self::Sheets(err) => match err {
                SheetsError::Connectivity(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Error de conexión",
                    "No se pudo conectar con Google Sheets. Verifica tu conexión a internet."
                        .to_owned(),
                ),
                SheetsError::Auth(_) => (
                    StatusCode::UNAUTHORIZED,
                    "Error de autenticación",
                    "Las credenciales de Google Sheets no son válidas. Verifica las variables de entorno."
                        .to_owned(),
                ),
                SheetsError::SheetNotFound(_) => (
                    StatusCode::NOT_FOUND,
                    "Hoja no encontrada",
                    "No se encontró la hoja de cálculo especificada. Verifica el ID de la hoja."
                        .to_owned(),
                ),
                SheetsError::Upstream { .. } | SheetsError::Parse(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor",
                    err.to_string(),
                ),
            },
        };

        tracing::error!(status = %status, error = %self, "catalog request failed");

        (
            status,
            Json(ErrorBody {
                error: error.to_owned(),
                message: Some(message),
            }),
        )
            .into_response()
    }
}
