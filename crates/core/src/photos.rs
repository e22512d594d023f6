//! Photo field resolution, shared by the server normalizer and the
//! client-side defensive pass.
//!
//! Sheets name the photo column inconsistently, so resolution walks a
//! fixed, priority-ordered candidate list and takes the first field that
//! holds anything.

use std::collections::BTreeMap;

use serde_json::Value;

/// Priority-ordered header names that may carry the photo list.
pub const PHOTO_FIELDS: [&str; 9] = [
    "fotos",
    "foto",
    "imagen",
    "imagenes",
    "images",
    "photo",
    "photos",
    "fotosarray",
    "fotos_array",
];

/// Loose truthiness for a JSON cell: empty strings, zero and null hold
/// nothing.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Resolve the photo list from the first candidate field holding a value.
///
/// String cells are split on `,`/`;`, pieces trimmed and empties dropped;
/// array cells are stringified per element. A matching field of any other
/// shape yields an empty list, as does no match at all.
#[must_use]
pub fn resolve_photos(fields: &BTreeMap<String, Value>) -> Vec<String> {
    for name in PHOTO_FIELDS {
        let Some(value) = fields.get(name) else {
            continue;
        };
        if !is_truthy(value) {
            continue;
        }
        return match value {
            Value::String(raw) => split_photo_list(raw),
            Value::Array(items) => items
                .iter()
                .map(|item| display_string(item).trim().to_owned())
                .filter(|piece| !piece.is_empty())
                .collect(),
            _ => Vec::new(),
        };
    }
    Vec::new()
}

/// Split a raw photo cell on comma/semicolon separators.
fn split_photo_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether an entry looks like a URL the storefront can load.
#[must_use]
pub fn is_web_url(entry: &str) -> bool {
    entry.starts_with("http://") || entry.starts_with("https://") || entry.starts_with("//")
}

/// Keep only trimmed entries with a recognized URL scheme; everything else
/// is dropped silently.
#[must_use]
pub fn retain_web_urls(photos: &[String]) -> Vec<String> {
    photos
        .iter()
        .map(|photo| photo.trim())
        .filter(|photo| !photo.is_empty() && is_web_url(photo))
        .map(str::to_owned)
        .collect()
}
