//! Row normalization: spreadsheet rows into [`ProductRecord`]s.
//!
//! Two passes share the same building blocks:
//!
//! - [`normalize_catalog`] runs server-side over the raw fetch result.
//! - [`renormalize`] runs client-side over records received on the wire,
//!   tolerating an upstream that skipped or mangled the first pass.
//!
//! Neither pass can fail: malformed rows degrade to best-effort records or
//! are filtered out, never escalating to a batch-level error.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::numeric;
use crate::photos;
use crate::record::{NUMERIC_FIELDS, ProductRecord};
use crate::row::SheetRow;

/// Turn header labels and raw rows into product records, dropping fully
/// blank rows.
#[must_use]
pub fn normalize_catalog(headers: &[String], rows: &[SheetRow]) -> Vec<ProductRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| normalize_row(headers, row, index))
        .filter(has_content)
        .collect()
}

fn normalize_row(headers: &[String], row: &SheetRow, index: usize) -> ProductRecord {
    let mut fields = BTreeMap::new();

    for header in headers {
        if header.trim().is_empty() {
            continue;
        }
        let clean = header.trim().to_lowercase();
        let cell = row
            .get(header)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        fields.insert(clean, coerce_cell(cell));
    }

    let id = resolve_id(&mut fields, index);
    let fotos_array = photos::resolve_photos(&fields);

    ProductRecord {
        id,
        fotos_array,
        fields,
    }
}

/// Apply the lossless-round-trip coercion to string cells.
fn coerce_cell(cell: Value) -> Value {
    match cell {
        Value::String(raw) => match numeric::coerce_number(&raw) {
            Some(number) => numeric::number_value(number),
            None => Value::String(raw),
        },
        other => other,
    }
}

/// Pop the `id` cell. Whole-number cells win; zero, fractional or
/// non-numeric ids fall back to the 1-based row position.
fn resolve_id(fields: &mut BTreeMap<String, Value>, index: usize) -> i64 {
    let fallback = i64::try_from(index + 1).unwrap_or(i64::MAX);
    match fields.remove("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .filter(|id| *id != 0)
            .unwrap_or(fallback),
        _ => fallback,
    }
}

/// Blank-row filter: a record survives only with a brand/model or at least
/// one other field holding something.
fn has_content(record: &ProductRecord) -> bool {
    record.marca().is_some()
        || record.modelo().is_some()
        || record.fields.values().any(is_meaningful)
}

fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        other => photos::is_truthy(other),
    }
}

/// Client-side defensive pass over one record received from the API.
///
/// Re-derives `fotosArray` when empty, keeps only web URLs, and re-coerces
/// the known numeric fields via leading-prefix parsing. Pure and
/// infallible; running it twice changes nothing.
#[must_use]
pub fn renormalize(mut record: ProductRecord) -> ProductRecord {
    if record.fotos_array.is_empty() {
        record.fotos_array = photos::resolve_photos(&record.fields);
    }
    record.fotos_array = photos::retain_web_urls(&record.fotos_array);

    for name in NUMERIC_FIELDS {
        let Some(Value::String(raw)) = record.fields.get(name) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        if let Some(parsed) = numeric::parse_float_prefix(raw) {
            record
                .fields
                .insert(name.to_owned(), numeric::number_value(parsed));
        }
    }

    record
}

/// [`renormalize`] over a whole catalog.
#[must_use]
pub fn renormalize_all(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records.into_iter().map(renormalize).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;

    fn sheet(
        headers: &[&str],
        rows: &[&[Value]],
    ) -> (Vec<String>, Vec<SheetRow>) {
        let labels: Vec<String> = headers.iter().map(|&h| h.to_owned()).collect();
        let shared: Arc<[String]> = labels.clone().into();
        let rows = rows
            .iter()
            .map(|cells| SheetRow::new(Arc::clone(&shared), cells.to_vec()))
            .collect();
        (labels, rows)
    }

    #[test]
    fn test_end_to_end_row() {
        let (headers, rows) = sheet(
            &["id", "marca", "modelo", "contado_ars", "fotos"],
            &[&[
                json!(""),
                json!("Apple"),
                json!("iPhone 15"),
                json!("999999"),
                json!("http://a.jpg, http://b.jpg"),
            ]],
        );

        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.marca(), Some("Apple"));
        assert_eq!(record.modelo(), Some("iPhone 15"));
        assert_eq!(record.contado_ars(), Some(999_999.0));
        assert_eq!(record.fotos_array, vec!["http://a.jpg", "http://b.jpg"]);
        assert_eq!(record.field("contado_ars"), Some(&json!(999_999)));
    }

    #[test]
    fn test_id_from_sheet_wins() {
        let (headers, rows) = sheet(
            &["id", "marca"],
            &[&[json!("7"), json!("Sony")], &[json!(""), json!("Apple")]],
        );
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records[0].id, 7);
        // row position is 1-based over all processed rows
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn test_zero_id_falls_back_to_position() {
        let (headers, rows) = sheet(&["id", "marca"], &[&[json!("0"), json!("Sony")]]);
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn test_id_cell_is_not_duplicated_in_fields() {
        let (headers, rows) = sheet(&["id", "marca"], &[&[json!("7"), json!("Sony")]]);
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records[0].field("id"), None);
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let (headers, rows) = sheet(
            &["marca", "modelo", "ram"],
            &[
                &[json!(""), json!(""), json!("")],
                &[json!("Sony"), json!(""), json!("")],
                &[json!("  "), json!("  "), json!(" ")],
            ],
        );
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].marca(), Some("Sony"));
    }

    #[test]
    fn test_row_with_only_specs_is_kept() {
        let (headers, rows) = sheet(&["marca", "ram"], &[&[json!(""), json!("8")]]);
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ram(), Some(8.0));
    }

    #[test]
    fn test_blank_headers_are_ignored() {
        let (headers, rows) = sheet(
            &["marca", "", "  "],
            &[&[json!("Sony"), json!("junk"), json!("junk")]],
        );
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records[0].fields.len(), 1);
    }

    #[test]
    fn test_headers_are_cleaned() {
        let (headers, rows) = sheet(&[" Marca ", "MODELO"], &[&[json!("Sony"), json!("Xperia")]]);
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records[0].marca(), Some("Sony"));
        assert_eq!(records[0].modelo(), Some("Xperia"));
    }

    #[test]
    fn test_short_rows_degrade_to_empty_cells() {
        let (headers, rows) = sheet(&["marca", "modelo"], &[&[json!("Sony")]]);
        let records = normalize_catalog(&headers, &rows);
        assert_eq!(records[0].modelo(), None);
        assert_eq!(records[0].field("modelo"), Some(&json!("")));
    }

    #[test]
    fn test_renormalize_filters_photo_schemes() {
        let record = ProductRecord {
            id: 1,
            fotos_array: vec!["ftp://x.jpg".to_owned(), "https://y.jpg".to_owned()],
            fields: BTreeMap::new(),
        };
        let record = renormalize(record);
        assert_eq!(record.fotos_array, vec!["https://y.jpg"]);
    }

    #[test]
    fn test_renormalize_rederives_missing_photos() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 3,
            "marca": "Apple",
            "fotos": "https://a.jpg; nota.txt",
        }))
        .expect("wire record");
        let record = renormalize(record);
        assert_eq!(record.fotos_array, vec!["https://a.jpg"]);
    }

    #[test]
    fn test_renormalize_coerces_numeric_fields_only() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "contado_ars": "999999",
            "ram": "8GB",
            "color": "12 rojo",
        }))
        .expect("wire record");
        let record = renormalize(record);
        assert_eq!(record.field("contado_ars"), Some(&json!(999_999)));
        assert_eq!(record.field("ram"), Some(&json!(8)));
        // not in the numeric field list, left untouched
        assert_eq!(record.field("color"), Some(&json!("12 rojo")));
    }

    #[test]
    fn test_renormalize_leaves_non_numeric_untouched() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "contado_usd": "consultar",
        }))
        .expect("wire record");
        let record = renormalize(record);
        assert_eq!(record.field("contado_usd"), Some(&json!("consultar")));
    }

    #[test]
    fn test_renormalize_is_idempotent() {
        let (headers, rows) = sheet(
            &["marca", "contado_ars", "fotos"],
            &[&[
                json!("Apple"),
                json!("999999"),
                json!("https://a.jpg, ftp://b.jpg"),
            ]],
        );
        let once = renormalize_all(normalize_catalog(&headers, &rows));
        let twice = renormalize_all(once.clone());
        assert_eq!(once, twice);
    }
}
