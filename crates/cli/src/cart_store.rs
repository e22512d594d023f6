//! File-backed cart persistence.
//!
//! The cart is a single JSON array of `{id, quantity}` entries, read and
//! written wholesale - the CLI's counterpart of the frontend's one
//! local-storage key. Single user, no partial updates.

use std::io;
use std::path::{Path, PathBuf};

use celushop_core::cart::Cart;
use tracing::warn;

/// Default cart file, next to wherever the CLI runs.
const DEFAULT_CART_PATH: &str = "celushop_cart.json";

/// Stores the cart as one JSON file.
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `CELUSHOP_CART_PATH`, defaulting to `celushop_cart.json`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CELUSHOP_CART_PATH").unwrap_or_else(|_| DEFAULT_CART_PATH.to_owned()),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cart; a missing or unreadable file degrades to empty.
    #[must_use]
    pub fn load(&self) -> Cart {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %self.path.display(), error = %err, "cart file corrupt, starting empty");
                Cart::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Cart::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cart file unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Persist the whole cart.
    ///
    /// # Errors
    ///
    /// I/O errors from writing the file.
    pub fn save(&self, cart: &Cart) -> io::Result<()> {
        let json = serde_json::to_string_pretty(cart).map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("celushop-cart-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = CartStore::new(temp_path("missing"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let store = CartStore::new(&path);

        let mut cart = Cart::new();
        cart.add(3, 2);
        cart.add(5, 1);
        store.save(&cart).expect("cart saves");

        let loaded = store.load();
        assert_eq!(loaded, cart);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json at all").expect("fixture writes");

        let store = CartStore::new(&path);
        assert!(store.load().is_empty());

        let _ = std::fs::remove_file(path);
    }
}
