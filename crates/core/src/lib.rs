//! Celushop Core - shared catalog domain library.
//!
//! This crate provides the catalog pipeline and domain types used across
//! all Celushop components:
//! - `server` - Catalog API backed by a Google Spreadsheet
//! - `cli` - Command-line storefront client (listing, cart, checkout)
//!
//! # Architecture
//!
//! The core crate contains only data types and pure functions - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`record`] - `ProductRecord` and its typed field accessors
//! - [`row`] - Spreadsheet rows addressed by header name
//! - [`normalize`] - Row normalization and the client-side defensive pass
//! - [`numeric`] - Numeric coercion heuristics for spreadsheet cells
//! - [`photos`] - Photo field resolution shared by both normalization passes
//! - [`catalog`] - Brand canonicalization, category and price filters
//! - [`cart`] - Client-local cart model
//! - [`whatsapp`] - Checkout message formatting and `wa.me` links
//! - [`money`] - Price formatting for the supported currencies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod money;
pub mod normalize;
pub mod numeric;
pub mod photos;
pub mod record;
pub mod row;
pub mod whatsapp;

pub use record::{Currency, NUMERIC_FIELDS, ProductRecord};
pub use row::SheetRow;
