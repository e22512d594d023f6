//! Cart management commands.
//!
//! Add/remove/clear work offline against the cart file; list and checkout
//! fetch the catalog to resolve names and prices.

use celushop_core::{catalog, money, whatsapp};
use tracing::info;

use crate::api::ApiClient;
use crate::cart_store::CartStore;
use crate::commands::{currency_from_env, whatsapp_number};

/// Add a product to the cart.
///
/// # Errors
///
/// I/O errors writing the cart file.
pub fn add(id: i64, cantidad: u32) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let store = CartStore::from_env();
    let mut cart = store.load();
    cart.add(id, cantidad);
    store.save(&cart)?;
    info!("Producto {id} agregado. Mi carrito ({})", cart.total_items());
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// I/O errors writing the cart file.
pub fn remove(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let store = CartStore::from_env();
    let mut cart = store.load();
    cart.remove(id);
    store.save(&cart)?;
    info!("Producto {id} eliminado. Mi carrito ({})", cart.total_items());
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// I/O errors writing the cart file.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let store = CartStore::from_env();
    let mut cart = store.load();
    cart.clear();
    store.save(&cart)?;
    info!("Carrito vacío.");
    Ok(())
}

/// Show cart contents with subtotals.
///
/// # Errors
///
/// Surfaces API client errors fetching the catalog.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let currency = currency_from_env();
    let store = CartStore::from_env();
    let cart = store.load();

    if cart.is_empty() {
        info!("El carrito está vacío.");
        return Ok(());
    }

    let mut products = ApiClient::from_env().get_catalog().await?;
    catalog::canonicalize_brands(&mut products);

    for item in cart.line_items(&products) {
        let unit = item.product.price(currency).unwrap_or(0.0);
        info!(
            "[{}] {} x{} - {} (subtotal {})",
            item.product.id,
            item.product.display_name(),
            item.quantity,
            money::format_price(unit, currency),
            money::format_price(item.subtotal(currency), currency)
        );
    }
    info!(
        "TOTAL: {}",
        money::format_price(cart.total(&products, currency), currency)
    );
    Ok(())
}

/// Print the WhatsApp checkout link for the cart.
///
/// # Errors
///
/// Surfaces API client errors fetching the catalog.
pub async fn checkout() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let currency = currency_from_env();
    let store = CartStore::from_env();
    let cart = store.load();

    if cart.is_empty() {
        info!("El carrito está vacío.");
        return Ok(());
    }

    let mut products = ApiClient::from_env().get_catalog().await?;
    catalog::canonicalize_brands(&mut products);

    let message = whatsapp::cart_message(&cart, &products, currency);
    let url = whatsapp::checkout_url(&whatsapp_number(), &message);
    info!("Abrí este enlace para completar la compra:");
    info!("{url}");
    Ok(())
}
