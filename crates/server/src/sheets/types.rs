//! Wire types for the Google Sheets v4 REST API.

use celushop_core::SheetRow;
use serde::Deserialize;
use serde_json::Value;

/// Response of `GET /v4/spreadsheets/{id}?fields=properties.title,sheets.properties`.
#[derive(Debug, Deserialize)]
pub struct SpreadsheetInfo {
    #[serde(default)]
    pub properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    #[serde(default)]
    pub title: String,
}

/// Response of `GET /v4/spreadsheets/{id}/values/{range}`.
#[derive(Debug, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Response of the OAuth token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Header labels plus rows of the first sheet tab.
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Title of the sheet tab the catalog was read from.
    pub title: String,
    /// Header labels in column order.
    pub headers: Vec<String>,
    /// Data rows, addressable by header name.
    pub rows: Vec<SheetRow>,
}
