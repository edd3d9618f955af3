//! # Catalog Collaborators
//!
//! Read-only product catalog and barcode index.
//!
//! ## Two Collaborators, One Trait
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Lookup Paths                                 │
//! │                                                                         │
//! │  Scanner input "8901234567890"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  barcode index { barcode → product_id } ──► get(product_id)            │
//! │                                                                         │
//! │  Typed input "cola"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first_match("cola") — case-insensitive substring on name OR sku       │
//! │                                                                         │
//! │  Both are READ-ONLY. There is no write path from billing.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-memory implementation stands in for an eventual backend; the
//! session only sees the trait.

use std::collections::HashMap;

use bodega_core::lookup;
use bodega_core::types::Product;

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read-only catalog surface consumed by the billing session.
pub trait Catalog {
    /// Gets a product by its id.
    fn get(&self, product_id: &str) -> Option<Product>;

    /// Resolves a barcode through the barcode index to a product.
    fn get_by_barcode(&self, barcode: &str) -> Option<Product>;

    /// Returns the FIRST product matching a text query (name or sku,
    /// case-insensitive substring), in catalog order. No ranking.
    fn first_match(&self, query: &str) -> Option<Product>;

    /// Full product list, for the catalog browser fallback after a miss.
    fn all(&self) -> Vec<Product>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Fixture-backed catalog with a separate barcode→product-id index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    barcode_index: HashMap<String, String>,
}

impl InMemoryCatalog {
    /// Creates a catalog from a product list and a barcode index.
    pub fn new(products: Vec<Product>, barcode_index: HashMap<String, String>) -> Self {
        InMemoryCatalog {
            products,
            barcode_index,
        }
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, product_id: &str) -> Option<Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id && p.is_active)
            .cloned()
    }

    fn get_by_barcode(&self, barcode: &str) -> Option<Product> {
        let product_id = self.barcode_index.get(barcode)?;
        self.get(product_id)
    }

    fn first_match(&self, query: &str) -> Option<Product> {
        lookup::first_text_match(&self.products, query).cloned()
    }

    fn all(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        let products = vec![
            Product::new("p-1", "BEV-COLA-330", "Cola 330ml", 299),
            Product::new("p-2", "SNK-CHIPS", "Chips Classic", 249),
        ];
        let mut index = HashMap::new();
        index.insert("8901234567890".to_string(), "p-1".to_string());
        InMemoryCatalog::new(products, index)
    }

    #[test]
    fn test_get_by_barcode() {
        let cat = catalog();
        let hit = cat.get_by_barcode("8901234567890").unwrap();
        assert_eq!(hit.id, "p-1");

        assert!(cat.get_by_barcode("0000000000000").is_none());
    }

    #[test]
    fn test_first_match() {
        let cat = catalog();
        assert_eq!(cat.first_match("chips").unwrap().id, "p-2");
        assert!(cat.first_match("espresso").is_none());
    }

    #[test]
    fn test_inactive_product_hidden_everywhere() {
        let mut cat = catalog();
        cat.products[0].is_active = false;

        assert!(cat.get("p-1").is_none());
        assert!(cat.get_by_barcode("8901234567890").is_none());
        assert!(cat.first_match("cola").is_none());
        assert_eq!(cat.all().len(), 1);
    }
}
