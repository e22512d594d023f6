//! Product records produced by the catalog normalization pipeline.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::numeric;

/// Field names the client-side pass re-coerces to numbers.
pub const NUMERIC_FIELDS: [&str; 11] = [
    "id",
    "contado_usd",
    "contado_ars",
    "cuotas_6",
    "cuotas_12",
    "tamano_pantalla",
    "ram",
    "memoria_interna",
    "bateria_capacidad",
    "camara_principal",
    "camara_secundaria",
];

/// Currency the storefront quotes prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Ars,
    Usd,
}

impl Currency {
    /// Header name of the cash-price column for this currency.
    #[must_use]
    pub const fn price_field(self) -> &'static str {
        match self {
            Self::Ars => "contado_ars",
            Self::Usd => "contado_usd",
        }
    }
}

/// Error parsing a currency name.
#[derive(Debug, thiserror::Error)]
#[error("unknown currency: {0} (expected \"ars\" or \"usd\")")]
pub struct ParseCurrencyError(String);

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ars" => Ok(Self::Ars),
            "usd" => Ok(Self::Usd),
            other => Err(ParseCurrencyError(other.to_owned())),
        }
    }
}

/// One row of the catalog after normalization.
///
/// Serializes to the flat JSON object of the catalog API: `id`,
/// `fotosArray` and every header-derived field at the top level. Fields
/// keep whatever shape the coercion heuristic left them in (string or
/// number), so typed access goes through the accessor methods rather than
/// struct fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique within one fetch result; assigned from row position when the
    /// sheet has no usable id column.
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: i64,
    /// Photo URLs resolved from the candidate field list; always present
    /// after normalization, possibly empty.
    #[serde(rename = "fotosArray", default)]
    pub fotos_array: Vec<String>,
    /// Lower-cased, trimmed header name mapped to its cell value.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Wire ids may arrive as floats or digit strings when the server-side
/// pass was bypassed; anything unusable collapses to zero rather than
/// failing the whole catalog.
#[allow(clippy::cast_possible_truncation)] // catalog ids are small integers
fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => numeric::parse_float_prefix(s).map_or(0, |f| f as i64),
        _ => 0,
    };
    Ok(id)
}

impl ProductRecord {
    /// Raw value of a header-derived field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String value of a field; blank strings and non-strings report `None`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of a field, whether already coerced or still a
    /// digit-bearing string (leading-prefix parse).
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => numeric::parse_float_prefix(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn marca(&self) -> Option<&str> {
        self.text("marca")
    }

    #[must_use]
    pub fn modelo(&self) -> Option<&str> {
        self.text("modelo")
    }

    #[must_use]
    pub fn contado_usd(&self) -> Option<f64> {
        self.number("contado_usd")
    }

    #[must_use]
    pub fn contado_ars(&self) -> Option<f64> {
        self.number("contado_ars")
    }

    #[must_use]
    pub fn cuotas_6(&self) -> Option<f64> {
        self.number("cuotas_6")
    }

    #[must_use]
    pub fn cuotas_12(&self) -> Option<f64> {
        self.number("cuotas_12")
    }

    #[must_use]
    pub fn ram(&self) -> Option<f64> {
        self.number("ram")
    }

    #[must_use]
    pub fn memoria_interna(&self) -> Option<f64> {
        self.number("memoria_interna")
    }

    #[must_use]
    pub fn tamano_pantalla(&self) -> Option<f64> {
        self.number("tamano_pantalla")
    }

    #[must_use]
    pub fn bateria_capacidad(&self) -> Option<f64> {
        self.number("bateria_capacidad")
    }

    #[must_use]
    pub fn camara_principal(&self) -> Option<f64> {
        self.number("camara_principal")
    }

    #[must_use]
    pub fn camara_secundaria(&self) -> Option<f64> {
        self.number("camara_secundaria")
    }

    /// Cash price in the given currency.
    #[must_use]
    pub fn price(&self, currency: Currency) -> Option<f64> {
        self.number(currency.price_field())
    }

    /// Display name for listings and checkout messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.marca(), self.modelo()) {
            (Some(marca), Some(modelo)) => format!("{marca} {modelo}"),
            (Some(solo), None) | (None, Some(solo)) => solo.to_owned(),
            (None, None) => format!("producto {}", self.id),
        }
    }
}
