//! Google Sheets catalog fetcher.
//!
//! Authenticates with a service account, resolves the first sheet tab and
//! returns its header labels plus rows. Single attempt per invocation: no
//! retries, no token caching, no catalog caching - the spreadsheet is the
//! source of truth and is re-read on every request.
//!
//! Failures are classified at the point where they occur (see
//! [`SheetsError`]) so the API layer can map each class to a distinct
//! status without inspecting message text.

mod auth;
pub mod types;

use std::sync::Arc;

use celushop_core::SheetRow;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::GoogleSheetsConfig;
use types::{SheetData, SpreadsheetInfo, ValueRange};

/// Production endpoints; tests inject a local double via
/// [`SheetsClient::with_endpoints`].
const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Errors raised while fetching the catalog.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The Sheets backend could not be reached.
    #[error("connection error: {0}")]
    Connectivity(String),

    /// Credentials were rejected.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The spreadsheet or its first sheet tab does not exist.
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    /// Any other non-success answer from the backend.
    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The backend answered with a body that did not decode.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SheetsError {
    /// Classify a transport-level failure: errors without an HTTP status
    /// mean the backend was never reached.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        err.status().map_or_else(
            || Self::Connectivity(err.to_string()),
            |status| Self::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
        )
    }
}

/// Client for the spreadsheet-backed catalog.
#[derive(Clone)]
pub struct SheetsClient {
    inner: Arc<SheetsClientInner>,
}

struct SheetsClientInner {
    client: reqwest::Client,
    config: GoogleSheetsConfig,
    api_base: String,
    token_url: String,
}

impl SheetsClient {
    /// Client against the production Google endpoints.
    #[must_use]
    pub fn new(config: GoogleSheetsConfig) -> Self {
        Self::with_endpoints(config, DEFAULT_API_BASE, DEFAULT_TOKEN_URL)
    }

    /// Client with explicit endpoints; tests point this at a local double.
    #[must_use]
    pub fn with_endpoints(config: GoogleSheetsConfig, api_base: &str, token_url: &str) -> Self {
        Self {
            inner: Arc::new(SheetsClientInner {
                client: reqwest::Client::new(),
                config,
                api_base: api_base.trim_end_matches('/').to_owned(),
                token_url: token_url.to_owned(),
            }),
        }
    }

    /// Fetch header labels and rows of the first sheet tab.
    ///
    /// # Errors
    ///
    /// Returns a [`SheetsError`] classified per failure point:
    /// connectivity, authentication, missing sheet, or malformed upstream
    /// data.
    #[instrument(skip(self), fields(sheet_id = %self.inner.config.sheet_id))]
    pub async fn fetch_catalog(&self) -> Result<SheetData, SheetsError> {
        let token = auth::fetch_access_token(
            &self.inner.client,
            &self.inner.token_url,
            &self.inner.config.service_account_email,
            &self.inner.config.private_key,
        )
        .await?;

        let info = self.spreadsheet_info(&token).await?;
        let first_sheet = info.sheets.first().ok_or_else(|| {
            SheetsError::SheetNotFound("the spreadsheet has no sheet tabs".to_owned())
        })?;
        let title = first_sheet.properties.title.clone();
        debug!(sheet = %title, tabs = info.sheets.len(), "resolved first sheet tab");

        let range = self.values(&token, &title).await?;
        let mut raw_rows = range.values.into_iter();
        let headers: Vec<String> = raw_rows
            .next()
            .unwrap_or_default()
            .iter()
            .map(cell_text)
            .collect();
        debug!(headers = ?headers, "header row loaded");

        let shared: Arc<[String]> = headers.clone().into();
        let rows = raw_rows
            .map(|cells| SheetRow::new(Arc::clone(&shared), cells))
            .collect();

        Ok(SheetData {
            title,
            headers,
            rows,
        })
    }

    async fn spreadsheet_info(&self, token: &str) -> Result<SpreadsheetInfo, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=properties.title,sheets.properties",
            self.inner.api_base, self.inner.config.sheet_id
        );
        let body = self.get(token, &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn values(&self, token: &str, sheet_title: &str) -> Result<ValueRange, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.inner.api_base,
            self.inner.config.sheet_id,
            urlencoding::encode(sheet_title)
        );
        let body = self.get(token, &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// One authenticated GET with status classification.
    async fn get(&self, token: &str, url: &str) -> Result<String, SheetsError> {
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(SheetsError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(SheetsError::from_transport)?;

        if status.is_success() {
            return Ok(body);
        }

        let message = truncate(&body);
        Err(match status.as_u16() {
            401 | 403 => SheetsError::Auth(message),
            404 => SheetsError::SheetNotFound(message),
            code => SheetsError::Upstream {
                status: code,
                message,
            },
        })
    }
}

/// Render a cell as text. The values API delivers formatted strings, but
/// stray numbers are tolerated.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Cap upstream bodies carried inside error messages.
pub(crate) fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_shapes() {
        assert_eq!(cell_text(&json!("Apple")), "Apple");
        assert_eq!(cell_text(&json!(250)), "250");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_truncate_caps_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).len(), 200);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_error_display_per_class() {
        assert_eq!(
            SheetsError::Auth("bad key".to_owned()).to_string(),
            "authentication error: bad key"
        );
        assert_eq!(
            SheetsError::SheetNotFound("no tabs".to_owned()).to_string(),
            "sheet not found: no tabs"
        );
        assert_eq!(
            SheetsError::Upstream {
                status: 500,
                message: "boom".to_owned()
            }
            .to_string(),
            "upstream error (status 500): boom"
        );
    }
}
