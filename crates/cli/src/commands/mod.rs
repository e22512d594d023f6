//! CLI command implementations.

pub mod cart;
pub mod catalog;

use celushop_core::Currency;

/// Display currency from `CELUSHOP_MONEDA`, defaulting to ARS.
pub(crate) fn currency_from_env() -> Currency {
    std::env::var("CELUSHOP_MONEDA")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Checkout phone number from `CELUSHOP_WHATSAPP`.
pub(crate) fn whatsapp_number() -> String {
    std::env::var("CELUSHOP_WHATSAPP").unwrap_or_else(|_| "5491123456789".to_owned())
}
