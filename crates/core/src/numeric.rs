//! Numeric coercion heuristics for spreadsheet cells.
//!
//! Spreadsheet cells arrive as formatted strings. Two parsing rules exist
//! side by side:
//!
//! - [`coerce_number`] - the server-side heuristic: coerce only cells the
//!   non-numeric strip leaves untouched and that round-trip losslessly
//!   through `f64`.
//! - [`parse_float_prefix`] - the client-side rule: take the longest
//!   leading numeric prefix, locale-agnostic.

use serde_json::Value;

/// Strip every character except ASCII digits, dot and minus.
fn strip_non_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Coerce a cell string to a number when the conversion is lossless.
///
/// Lossless means both checks hold: stripping non-numeric characters
/// removed nothing (a cell with residual content like `"250GB"` stays a
/// string), and the remaining text round-trips through `f64` exactly
/// (`"00123"` and `".5"` stay strings). Digit-only identifiers do coerce -
/// the heuristic has no knowledge of field semantics.
#[must_use]
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = strip_non_numeric(trimmed);
    if stripped.is_empty() || stripped != trimmed {
        return None;
    }
    let parsed: f64 = stripped.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    (format!("{parsed}") == stripped).then_some(parsed)
}

/// Leading-prefix float parsing: the longest prefix matching
/// `[+-]? digits [. digits]` is parsed, anything after it ignored.
///
/// `"250GB"` parses to `250`, `"6.1\""` to `6.1`, `"N/A"` to `None`.
#[must_use]
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let mut len = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        len = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s.get(..len)?.parse().ok()
}

/// Wrap a finite float as a JSON number, keeping whole values integral so
/// the wire format prints `250`, not `250.0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // exact: fract() == 0 and in range
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}
