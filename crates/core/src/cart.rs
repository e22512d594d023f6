//! Client-local cart model.
//!
//! The cart stores only product ids and quantities; lines are joined
//! against a fetched catalog on demand. Persistence (a single JSON file,
//! read and written wholesale) lives with the client, not here.

use serde::{Deserialize, Serialize};

use crate::record::{Currency, ProductRecord};

/// One cart line as persisted: product id and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: i64,
    pub quantity: u32,
}

/// The whole cart. Serializes as a bare array of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a product, merging with an existing line for the same id.
    pub fn add(&mut self, id: i64, quantity: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.quantity = entry.quantity.saturating_add(quantity);
        } else {
            self.entries.push(CartEntry { id, quantity });
        }
    }

    /// Drop the line for a product id, if present.
    pub fn remove(&mut self, id: i64) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Set the quantity of an existing line; zero removes it.
    pub fn set_quantity(&mut self, id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }

    /// Join entries against a catalog; ids no longer in the catalog are
    /// skipped.
    #[must_use]
    pub fn line_items<'a>(&self, catalog: &'a [ProductRecord]) -> Vec<LineItem<'a>> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let product = catalog.iter().find(|product| product.id == entry.id)?;
                Some(LineItem {
                    product,
                    quantity: entry.quantity,
                })
            })
            .collect()
    }

    /// Cart total in the given currency; unpriced products count as zero.
    #[must_use]
    pub fn total(&self, catalog: &[ProductRecord], currency: Currency) -> f64 {
        self.line_items(catalog)
            .iter()
            .map(|item| item.subtotal(currency))
            .sum()
    }
}

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a> {
    pub product: &'a ProductRecord,
    pub quantity: u32,
}

impl LineItem<'_> {
    /// Unit price times quantity in the given currency.
    #[must_use]
    pub fn subtotal(&self, currency: Currency) -> f64 {
        self.product.price(currency).unwrap_or(0.0) * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn product(id: i64, price_ars: f64) -> ProductRecord {
        let fields: std::collections::BTreeMap<String, Value> =
            [("contado_ars".to_owned(), json!(price_ars))].into();
        ProductRecord {
            id,
            fotos_array: Vec::new(),
            fields,
        }
    }

    #[test]
    fn test_add_merges_quantities() {
        let mut cart = Cart::new();
        cart.add(1, 1);
        cart.add(2, 1);
        cart.add(1, 2);
        assert_eq!(cart.entries().len(), 2);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(1, 3);
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(1, 1);
        cart.set_quantity(99, 5);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_line_items_skip_missing_products() {
        let catalog = vec![product(1, 1000.0)];
        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(99, 1);

        let items = cart.line_items(&catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id, 1);
    }

    #[test]
    fn test_total() {
        let catalog = vec![product(1, 1000.0), product(2, 250.0)];
        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(2, 1);
        assert!((cart.total(&catalog, Currency::Ars) - 2250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wire_format_is_bare_array() {
        let mut cart = Cart::new();
        cart.add(3, 2);
        let wire = serde_json::to_value(&cart).expect("cart serializes");
        assert_eq!(wire, json!([{"id": 3, "quantity": 2}]));
    }
}
