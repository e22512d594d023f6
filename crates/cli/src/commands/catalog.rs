//! Catalog listing command.

use std::str::FromStr;

use celushop_core::catalog::{self, Category};
use celushop_core::money;
use celushop_core::record::{Currency, ProductRecord};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::commands::currency_from_env;

/// Fetch, filter and print the catalog.
///
/// # Errors
///
/// Surfaces API client errors; filtering never fails.
pub async fn list(
    marca: Option<&str>,
    categoria: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let currency = currency_from_env();

    let client = ApiClient::from_env();
    let mut products = client.get_catalog().await?;

    if products.is_empty() {
        info!("No se encontraron productos en el catálogo.");
        return Ok(());
    }

    catalog::canonicalize_brands(&mut products);

    // An unknown category mirrors the storefront: warn and show everything.
    let category = categoria.and_then(|slug| match Category::from_str(slug) {
        Ok(category) => Some(category),
        Err(err) => {
            warn!("{err}; mostrando todos los productos");
            None
        }
    });
    let products = catalog::filter_by_category(products, category);
    let products = catalog::with_price(products, currency);

    if products.is_empty() {
        info!("No hay productos disponibles.");
        return Ok(());
    }

    match marca {
        Some(name) => list_brand(&products, name, currency),
        None => list_all(&products, currency),
    }

    Ok(())
}

/// One brand as a flat listing, priciest first.
fn list_brand(products: &[ProductRecord], name: &str, currency: Currency) {
    let Some(brand) = catalog::resolve_brand(name) else {
        info!("Marca no encontrada.");
        return;
    };

    let listing = catalog::brand_listing(products, brand, currency);
    if listing.is_empty() {
        info!("No hay productos de {brand}.");
        return;
    }

    print_brand(brand, &listing, currency);
}

/// Every brand in display order, each sorted by price.
fn list_all(products: &[ProductRecord], currency: Currency) {
    for brand in catalog::extract_brands(products) {
        let listing = catalog::brand_listing(products, &brand, currency);
        if !listing.is_empty() {
            print_brand(&brand, &listing, currency);
        }
    }
}

fn print_brand(brand: &str, listing: &[ProductRecord], currency: Currency) {
    let label = if listing.len() == 1 {
        "producto"
    } else {
        "productos"
    };
    info!("{brand} ({} {label})", listing.len());

    for product in listing {
        let price = product.price(currency).unwrap_or(0.0);
        let specs = spec_summary(product);
        if specs.is_empty() {
            info!(
                "  [{}] {} - {}",
                product.id,
                product.display_name(),
                money::format_price(price, currency)
            );
        } else {
            info!(
                "  [{}] {} - {} ({specs})",
                product.id,
                product.display_name(),
                money::format_price(price, currency)
            );
        }
    }
}

/// Short spec line: RAM, storage, screen and main camera when present.
fn spec_summary(product: &ProductRecord) -> String {
    let mut specs = Vec::new();
    if let Some(ram) = product.ram().filter(|v| *v > 0.0) {
        specs.push(format!("{ram}GB RAM"));
    }
    if let Some(memoria) = product.memoria_interna().filter(|v| *v > 0.0) {
        specs.push(format!("{memoria}GB"));
    }
    if let Some(pantalla) = product.tamano_pantalla().filter(|v| *v > 0.0) {
        specs.push(format!("{pantalla}\""));
    }
    if let Some(camara) = product.camara_principal().filter(|v| *v > 0.0) {
        specs.push(format!("{camara}MP"));
    }
    specs.join(" · ")
}
