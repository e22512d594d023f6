//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::GoogleSheetsConfig;
use crate::sheets::SheetsClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds no mutable data - every request
/// fetches its own catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    sheets: Option<SheetsClient>,
}

impl AppState {
    /// State backed by the given catalog client.
    ///
    /// `None` keeps the server bootable without Google configuration; the
    /// catalog route then answers the configuration error, matching the
    /// serverless deployment where env vars are checked per invocation.
    #[must_use]
    pub fn new(sheets: Option<SheetsClient>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { sheets }),
        }
    }

    /// State from environment configuration.
    #[must_use]
    pub fn from_env() -> Self {
        match GoogleSheetsConfig::from_env() {
            Ok(config) => Self::new(Some(SheetsClient::new(config))),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Google Sheets configuration incomplete; /api/catalogo will answer 500"
                );
                Self::new(None)
            }
        }
    }

    /// Get the catalog client, if configured.
    #[must_use]
    pub fn sheets(&self) -> Option<&SheetsClient> {
        self.inner.sheets.as_ref()
    }
}
