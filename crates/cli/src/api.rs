//! HTTP client for the catalog API.
//!
//! Every fetched catalog runs through the defensive re-normalization pass
//! before reaching callers, so the rest of the CLI can trust photo URLs
//! and numeric fields regardless of what the server actually sent.

use celushop_core::ProductRecord;
use celushop_core::normalize::renormalize_all;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Transport failure before an HTTP status was received.
    #[error("Error de conexión. Verifica tu conexión a internet e intenta nuevamente.")]
    Connection(#[source] reqwest::Error),

    /// Non-success status, or a `success: false` payload; carries the
    /// server's localized message.
    #[error("{message}")]
    Api { message: String },

    /// Body that did not decode as a catalog response.
    #[error("Respuesta inválida del servidor: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Wire shape of the API's error responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Wire shape of the catalog response.
#[derive(Debug, Deserialize)]
struct CatalogPayload {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    productos: Vec<ProductRecord>,
}

/// Client for the catalog API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Client from `CELUSHOP_API_URL`, defaulting to the local dev server.
    #[must_use]
    pub fn from_env() -> Self {
        let base = std::env::var("CELUSHOP_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned());
        Self::new(&base)
    }

    /// Fetch the catalog and run the defensive client-side pass over it.
    ///
    /// # Errors
    ///
    /// `ApiClientError` per failure class; a non-success body surfaces the
    /// server's `message` verbatim.
    pub async fn get_catalog(&self) -> Result<Vec<ProductRecord>, ApiClientError> {
        let url = format!("{}/api/catalogo", self.base_url);
        debug!(%url, "requesting catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiClientError::Connection)?;
        let status = response.status();

        if !status.is_success() {
            let payload: ErrorPayload = response.json().await.unwrap_or_default();
            let message = payload
                .message
                .or(payload.error)
                .unwrap_or_else(|| format!("Error {status}"));
            return Err(ApiClientError::Api { message });
        }

        let payload: CatalogPayload = response.json().await.map_err(ApiClientError::Parse)?;
        if !payload.success {
            return Err(ApiClientError::Api {
                message: payload
                    .message
                    .unwrap_or_else(|| "Error al obtener el catálogo".to_owned()),
            });
        }

        debug!(count = payload.productos.len(), "catalog received");
        Ok(renormalize_all(payload.productos))
    }
}
