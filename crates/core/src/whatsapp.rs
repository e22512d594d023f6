//! Checkout messages and `wa.me` links.
//!
//! Checkout is a WhatsApp conversation: the client builds a pre-filled
//! message for one product or the whole cart and opens a `wa.me` link
//! carrying it url-encoded.

use crate::cart::Cart;
use crate::money;
use crate::record::{Currency, ProductRecord};

/// Checkout message for a single product.
#[must_use]
pub fn product_message(product: &ProductRecord, currency: Currency) -> String {
    let price = product.price(currency).unwrap_or(0.0);
    let mut message = format!(
        "Hola! Me interesa comprar el {}\n\n",
        product.display_name()
    );
    message.push_str(&format!(
        "Precio: {}\n",
        money::format_price(price, currency)
    ));

    if let Some(cuotas) = product.cuotas_12().filter(|v| *v > 0.0) {
        message.push_str(&format!(
            "12 cuotas: {}\n",
            money::format_price(cuotas, Currency::Ars)
        ));
    }
    if let Some(ram) = product.ram().filter(|v| *v > 0.0) {
        message.push_str(&format!("RAM: {ram}GB\n"));
    }
    if let Some(memoria) = product.memoria_interna().filter(|v| *v > 0.0) {
        message.push_str(&format!("Memoria: {memoria}GB\n"));
    }

    message
}

/// Checkout message for the whole cart: numbered lines with quantity, unit
/// price and subtotal, closed by the grand total.
#[must_use]
pub fn cart_message(cart: &Cart, catalog: &[ProductRecord], currency: Currency) -> String {
    let mut message = String::from("Hola! Me interesa comprar los siguientes celulares:\n\n");

    for (index, item) in cart.line_items(catalog).iter().enumerate() {
        let unit = item.product.price(currency).unwrap_or(0.0);
        message.push_str(&format!("{}. {}\n", index + 1, item.product.display_name()));
        message.push_str(&format!("   Cantidad: {}\n", item.quantity));
        message.push_str(&format!(
            "   Precio unitario: {}\n",
            money::format_price(unit, currency)
        ));
        message.push_str(&format!(
            "   Subtotal: {}\n\n",
            money::format_price(item.subtotal(currency), currency)
        ));
    }

    message.push_str(&format!(
        "TOTAL: {}",
        money::format_price(cart.total(catalog, currency), currency)
    ));
    message
}

/// `wa.me` link carrying the url-encoded message.
#[must_use]
pub fn checkout_url(phone: &str, message: &str) -> String {
    format!("https://wa.me/{phone}?text={}", urlencoding::encode(message))
}
