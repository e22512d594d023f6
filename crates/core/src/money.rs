//! Price formatting for the supported currencies.
//!
//! ARS amounts follow es-AR digit grouping (dot thousands separator,
//! comma decimals, integer amounts rendered bare); USD amounts follow
//! en-US grouping with two decimals always.

use crate::record::Currency;

/// Format an amount the way the storefront quotes it, currency code
/// included: `$999.999 ARS`, `$1,234.50 USD`.
#[must_use]
pub fn format_price(amount: f64, currency: Currency) -> String {
    match currency {
        Currency::Ars => format!("${} ARS", format_es_ar(amount)),
        Currency::Usd => format!("${} USD", format_en_us(amount)),
    }
}

/// es-AR rendering: `999999` -> `999.999`, `1234.5` -> `1.234,5`.
#[must_use]
pub fn format_es_ar(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&whole.to_string(), '.'));
    if cents != 0 {
        out.push(',');
        if cents % 10 == 0 {
            out.push_str(&(cents / 10).to_string());
        } else {
            out.push_str(&format!("{cents:02}"));
        }
    }
    out
}

/// en-US rendering with two decimals: `1234.5` -> `1,234.50`.
#[must_use]
pub fn format_en_us(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}.{cents:02}", group_thousands(&whole.to_string(), ','))
}

/// Split an amount into sign, whole units and cents, rounded to two
/// decimals.
fn split_cents(amount: f64) -> (bool, i64, i64) {
    let negative = amount < 0.0;
    #[allow(clippy::cast_possible_truncation)] // prices fit comfortably in i64 cents
    let total_cents = (amount.abs() * 100.0).round() as i64;
    (negative, total_cents / 100, total_cents % 100)
}

/// Insert a separator every three digits from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_es_ar_integers() {
        assert_eq!(format_es_ar(999_999.0), "999.999");
        assert_eq!(format_es_ar(1000.0), "1.000");
        assert_eq!(format_es_ar(999.0), "999");
        assert_eq!(format_es_ar(0.0), "0");
    }

    #[test]
    fn test_es_ar_decimals() {
        assert_eq!(format_es_ar(1234.5), "1.234,5");
        assert_eq!(format_es_ar(1234.55), "1.234,55");
    }

    #[test]
    fn test_en_us_always_two_decimals() {
        assert_eq!(format_en_us(1234.5), "1,234.50");
        assert_eq!(format_en_us(999.0), "999.00");
        assert_eq!(format_en_us(1_000_000.0), "1,000,000.00");
    }

    #[test]
    fn test_format_price_with_code() {
        assert_eq!(format_price(999_999.0, Currency::Ars), "$999.999 ARS");
        assert_eq!(format_price(499.99, Currency::Usd), "$499.99 USD");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_es_ar(-1500.0), "-1.500");
        assert_eq!(format_en_us(-1500.0), "-1,500.00");
    }
}
