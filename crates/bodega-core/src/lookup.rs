//! # Product Lookup
//!
//! Query classification and matching for the billing search field.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Lookup Flow                                  │
//! │                                                                         │
//! │  Raw input (scanner or keyboard)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  Is query a barcode? (10+ digits)         │                         │
//! │  │  YES: barcode index → product id → catalog│──► Found? Add to cart   │
//! │  │  NO:  substring match on name OR sku      │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FIRST match only, no ranking                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  No match ──► NOT an error: caller opens the full catalog browser      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The functions here are pure predicates; the catalog collaborator in
//! `bodega-billing` applies them against its product list.

use crate::types::Product;
use crate::MIN_BARCODE_DIGITS;

/// Checks if a query should be treated as a barcode.
///
/// ## Rule
/// 10 or more characters, all ASCII digits. Barcode scanners "type" the full
/// code in under 50ms, so a digits-only string of this length is effectively
/// never a hand-typed product name.
///
/// ## Example
/// ```rust
/// use bodega_core::lookup::is_barcode_query;
///
/// assert!(is_barcode_query("8901234567890"));
/// assert!(!is_barcode_query("123456789"));   // too short
/// assert!(!is_barcode_query("coke-330"));    // not numeric
/// ```
pub fn is_barcode_query(query: &str) -> bool {
    query.len() >= MIN_BARCODE_DIGITS && query.chars().all(|c| c.is_ascii_digit())
}

/// Case-insensitive substring match against product name or SKU.
///
/// This is the text half of the lookup contract: no tokenizing, no ranking,
/// the caller takes the FIRST product for which this returns true.
pub fn matches_text_query(product: &Product, query: &str) -> bool {
    let query = query.to_lowercase();
    product.name.to_lowercase().contains(&query) || product.sku.to_lowercase().contains(&query)
}

/// Finds the first active product matching a text query, in catalog order.
pub fn first_text_match<'a>(products: &'a [Product], query: &str) -> Option<&'a Product> {
    products
        .iter()
        .filter(|p| p.is_active)
        .find(|p| matches_text_query(p, query))
}

// =============================================================================
// Unit Tests
// =============================================================================
