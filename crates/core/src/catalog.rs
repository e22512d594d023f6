//! Catalog views: brand canonicalization, category and price filters.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::record::{Currency, ProductRecord};

/// Brands the storefront groups products under, in display order.
pub const KNOWN_BRANDS: [&str; 6] = [
    "Apple", "Xiaomi", "Samsung", "Motorola", "Sony", "Nintendo",
];

/// Bucket for products whose brand is blank or unrecognized.
pub const OTHER_BRAND: &str = "Otros";

static RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)").expect("resolution pattern is valid"));

/// Rewrite `marca` to its canonical casing, or [`OTHER_BRAND`] when blank
/// or unrecognized.
pub fn canonicalize_brand(record: &mut ProductRecord) {
    let canonical = match record.marca() {
        Some(marca) => KNOWN_BRANDS
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(marca.trim()))
            .unwrap_or(OTHER_BRAND)
            .to_owned(),
        None => OTHER_BRAND.to_owned(),
    };
    record
        .fields
        .insert("marca".to_owned(), Value::String(canonical));
}

/// [`canonicalize_brand`] over a whole catalog.
pub fn canonicalize_brands(records: &mut [ProductRecord]) {
    for record in records {
        canonicalize_brand(record);
    }
}

/// Resolve a user-supplied brand name to its canonical form.
#[must_use]
pub fn resolve_brand(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.eq_ignore_ascii_case(OTHER_BRAND) {
        return Some(OTHER_BRAND);
    }
    KNOWN_BRANDS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
}

/// Curated category filters from the storefront landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Strong main cameras; Apple gets a lower bar than the rest.
    FotografiaPro,
    /// Screen resolution area above 1400x2300.
    GamingMode,
    /// Battery capacity above 5000 mAh.
    BateriaInfinita,
    /// Exactly 6.1-inch screens.
    Compactos,
}

impl Category {
    /// URL-style identifier of the category.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::FotografiaPro => "fotografia-pro",
            Self::GamingMode => "gaming-mode",
            Self::BateriaInfinita => "bateria-infinita",
            Self::Compactos => "compactos",
        }
    }

    /// Whether a product belongs to this category.
    #[must_use]
    pub fn matches(self, record: &ProductRecord) -> bool {
        match self {
            Self::FotografiaPro => {
                let camara = record.camara_principal().unwrap_or(0.0);
                let is_apple = record
                    .marca()
                    .is_some_and(|marca| marca.eq_ignore_ascii_case("apple"));
                if is_apple { camara >= 48.0 } else { camara > 51.0 }
            }
            Self::GamingMode => {
                screen_area(record).is_some_and(|area| area > 1400 * 2300)
            }
            Self::BateriaInfinita => record.bateria_capacidad().unwrap_or(0.0) > 5000.0,
            Self::Compactos => record
                .tamano_pantalla()
                .is_some_and(|size| (size - 6.1).abs() < f64::EPSILON),
        }
    }
}

/// Error parsing a category slug.
#[derive(Debug, thiserror::Error)]
#[error(
    "unknown category: {0} (expected fotografia-pro, gaming-mode, bateria-infinita or compactos)"
)]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fotografia-pro" => Ok(Self::FotografiaPro),
            "gaming-mode" => Ok(Self::GamingMode),
            "bateria-infinita" => Ok(Self::BateriaInfinita),
            "compactos" => Ok(Self::Compactos),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Screen area in pixels, parsed from a `WxH` resolution field.
fn screen_area(record: &ProductRecord) -> Option<i64> {
    let raw = match record.field("resolucion")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let caps = RESOLUTION.captures(&raw)?;
    let width: i64 = caps.get(1)?.as_str().parse().ok()?;
    let height: i64 = caps.get(2)?.as_str().parse().ok()?;
    Some(width * height)
}

/// Apply a category filter; `None` leaves the catalog unfiltered.
#[must_use]
pub fn filter_by_category(
    records: Vec<ProductRecord>,
    category: Option<Category>,
) -> Vec<ProductRecord> {
    match category {
        Some(category) => records
            .into_iter()
            .filter(|record| category.matches(record))
            .collect(),
        None => records,
    }
}

/// Whether a product has a positive price in the given currency.
#[must_use]
pub fn has_price(record: &ProductRecord, currency: Currency) -> bool {
    record.price(currency).is_some_and(|price| price > 0.0)
}

/// Keep only products priced above zero in the given currency.
#[must_use]
pub fn with_price(records: Vec<ProductRecord>, currency: Currency) -> Vec<ProductRecord> {
    records
        .into_iter()
        .filter(|record| has_price(record, currency))
        .collect()
}

/// Unique brands present in the catalog: known brands first in display
/// order, then [`OTHER_BRAND`], then anything else alphabetically.
#[must_use]
pub fn extract_brands(records: &[ProductRecord]) -> Vec<String> {
    let mut seen: BTreeSet<String> = records
        .iter()
        .filter_map(ProductRecord::marca)
        .map(|marca| marca.trim().to_owned())
        .filter(|marca| !marca.is_empty())
        .collect();

    let mut ordered = Vec::with_capacity(seen.len());
    for known in KNOWN_BRANDS {
        if seen.remove(known) {
            ordered.push(known.to_owned());
        }
    }
    if seen.remove(OTHER_BRAND) {
        ordered.push(OTHER_BRAND.to_owned());
    }
    ordered.extend(seen);
    ordered
}

/// Products of one brand, priciest first.
#[must_use]
pub fn brand_listing(
    records: &[ProductRecord],
    brand: &str,
    currency: Currency,
) -> Vec<ProductRecord> {
    let mut listing: Vec<ProductRecord> = records
        .iter()
        .filter(|record| record.marca() == Some(brand))
        .cloned()
        .collect();
    sort_by_price_desc(&mut listing, currency);
    listing
}

/// Order a listing by price, highest first; unpriced products sink.
pub fn sort_by_price_desc(records: &mut [ProductRecord], currency: Currency) {
    records.sort_by(|a, b| {
        let price_a = a.price(currency).unwrap_or(0.0);
        let price_b = b.price(currency).unwrap_or(0.0);
        price_b.partial_cmp(&price_a).unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> ProductRecord {
        ProductRecord {
            id: 1,
            fotos_array: Vec::new(),
            fields: pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_canonicalize_known_brand() {
        let mut r = record(&[("marca", json!("  apple "))]);
        canonicalize_brand(&mut r);
        assert_eq!(r.marca(), Some("Apple"));
    }

    #[test]
    fn test_canonicalize_unknown_and_blank() {
        let mut unknown = record(&[("marca", json!("Huawei"))]);
        canonicalize_brand(&mut unknown);
        assert_eq!(unknown.marca(), Some(OTHER_BRAND));

        let mut blank = record(&[("marca", json!(""))]);
        canonicalize_brand(&mut blank);
        assert_eq!(blank.marca(), Some(OTHER_BRAND));
    }

    #[test]
    fn test_resolve_brand() {
        assert_eq!(resolve_brand("samsung"), Some("Samsung"));
        assert_eq!(resolve_brand("OTROS"), Some(OTHER_BRAND));
        assert_eq!(resolve_brand("huawei"), None);
    }

    #[test]
    fn test_fotografia_pro_thresholds() {
        let apple = record(&[("marca", json!("Apple")), ("camara_principal", json!(48))]);
        assert!(Category::FotografiaPro.matches(&apple));

        let other_at_48 = record(&[("marca", json!("Xiaomi")), ("camara_principal", json!(48))]);
        assert!(!Category::FotografiaPro.matches(&other_at_48));

        let other_above = record(&[("marca", json!("Xiaomi")), ("camara_principal", json!(64))]);
        assert!(Category::FotografiaPro.matches(&other_above));
    }

    #[test]
    fn test_gaming_mode_resolution_area() {
        let big = record(&[("resolucion", json!("1440x3200"))]);
        assert!(Category::GamingMode.matches(&big));

        let at_limit = record(&[("resolucion", json!("1400x2300"))]);
        assert!(!Category::GamingMode.matches(&at_limit));

        let unparseable = record(&[("resolucion", json!("full hd"))]);
        assert!(!Category::GamingMode.matches(&unparseable));

        let missing = record(&[]);
        assert!(!Category::GamingMode.matches(&missing));
    }

    #[test]
    fn test_bateria_and_compactos() {
        let battery = record(&[("bateria_capacidad", json!(5100))]);
        assert!(Category::BateriaInfinita.matches(&battery));
        assert!(!Category::BateriaInfinita.matches(&record(&[(
            "bateria_capacidad",
            json!(5000)
        )])));

        let compact = record(&[("tamano_pantalla", json!(6.1))]);
        assert!(Category::Compactos.matches(&compact));
        assert!(!Category::Compactos.matches(&record(&[("tamano_pantalla", json!(6.7))])));
    }

    #[test]
    fn test_category_slug_roundtrip() {
        for category in [
            Category::FotografiaPro,
            Category::GamingMode,
            Category::BateriaInfinita,
            Category::Compactos,
        ] {
            assert_eq!(category.slug().parse::<Category>().ok(), Some(category));
        }
        assert!("premium".parse::<Category>().is_err());
    }

    #[test]
    fn test_price_filter() {
        let records = vec![
            record(&[("marca", json!("Apple")), ("contado_ars", json!(1000))]),
            record(&[("marca", json!("Sony")), ("contado_ars", json!(0))]),
            record(&[("marca", json!("Xiaomi"))]),
        ];
        let priced = with_price(records, Currency::Ars);
        assert_eq!(priced.len(), 1);
        assert_eq!(priced[0].marca(), Some("Apple"));
    }

    #[test]
    fn test_extract_brands_ordering() {
        let records = vec![
            record(&[("marca", json!("Zeta"))]),
            record(&[("marca", json!(OTHER_BRAND))]),
            record(&[("marca", json!("Sony"))]),
            record(&[("marca", json!("Apple"))]),
            record(&[("marca", json!("Alpha"))]),
        ];
        assert_eq!(
            extract_brands(&records),
            vec!["Apple", "Sony", OTHER_BRAND, "Alpha", "Zeta"]
        );
    }

    #[test]
    fn test_brand_listing_sorted_by_price() {
        let records = vec![
            record(&[("marca", json!("Apple")), ("contado_ars", json!(500))]),
            record(&[("marca", json!("Apple")), ("contado_ars", json!(900))]),
            record(&[("marca", json!("Sony")), ("contado_ars", json!(700))]),
        ];
        let listing = brand_listing(&records, "Apple", Currency::Ars);
        let prices: Vec<Option<f64>> = listing.iter().map(|r| r.contado_ars()).collect();
        assert_eq!(prices, vec![Some(900.0), Some(500.0)]);
    }
}
