//! # Fixture Data
//!
//! Development fixtures: a small corner-store catalog with a barcode index,
//! a seeded invoice history, and credit balances. The demo binary and the
//! doc examples run against these; tests mostly build their own smaller sets.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use bodega_core::types::{Invoice, InvoiceLine, InvoiceStatus, PaymentMethod, Product};

use crate::catalog::InMemoryCatalog;
use crate::invoices::{InMemoryInvoiceStore, InvoiceStore};
use crate::settlement::CreditBook;

/// Corner-store catalog: beverages, snacks, pantry, fresh.
pub fn fixture_catalog() -> InMemoryCatalog {
    let products = vec![
        // Beverages
        Product::new("prod-001", "BEV-COLA-330", "Cola 330ml Can", 299),
        Product::new("prod-002", "BEV-WATER-500", "Still Water 500ml", 149),
        Product::new("prod-003", "BEV-JUICE-1L", "Orange Juice 1L", 549),
        Product::new("prod-004", "BEV-COFFEE-250", "Cold Brew Coffee 250ml", 449),
        // Snacks
        Product::new("prod-005", "SNK-CHIPS-CLS", "Chips Classic Salted", 249),
        Product::new("prod-006", "SNK-CHOC-BAR", "Milk Chocolate Bar", 199),
        Product::new("prod-007", "SNK-NUTS-MIX", "Mixed Nuts 200g", 699),
        // Pantry
        Product::new("prod-008", "PAN-RICE-1KG", "Basmati Rice 1kg", 899),
        Product::new("prod-009", "PAN-PASTA-500", "Penne Pasta 500g", 329),
        Product::new("prod-010", "PAN-OIL-1L", "Sunflower Oil 1L", 1249),
        // Fresh
        Product::new("prod-011", "FRS-MILK-1L", "Whole Milk 1L", 389),
        Product::new("prod-012", "FRS-BREAD-LOAF", "Sourdough Loaf", 599),
        Product::new("prod-013", "FRS-EGGS-12", "Free Range Eggs x12", 799),
        // Soft-deleted: visible nowhere
        Product {
            id: "prod-099".to_string(),
            sku: "DISC-OLD-ITEM".to_string(),
            name: "Discontinued Item".to_string(),
            price_cents: 100,
            is_active: false,
        },
    ];

    let mut barcode_index = HashMap::new();
    barcode_index.insert("8900000000017".to_string(), "prod-001".to_string());
    barcode_index.insert("8900000000024".to_string(), "prod-002".to_string());
    barcode_index.insert("8900000000031".to_string(), "prod-005".to_string());
    barcode_index.insert("8900000000048".to_string(), "prod-006".to_string());
    barcode_index.insert("8900000000055".to_string(), "prod-008".to_string());
    barcode_index.insert("8900000000062".to_string(), "prod-011".to_string());

    InMemoryCatalog::new(products, barcode_index)
}

/// Invoice history with a few past sales, oldest first, so the demo's
/// history browser and the return workflow have something to load.
pub fn fixture_invoice_store() -> InMemoryInvoiceStore {
    let mut store = InMemoryInvoiceStore::new();
    let now = Utc::now();

    store.append(
        Invoice {
            id: Uuid::new_v4().to_string(),
            number: "INV-20260810-0101".to_string(),
            date: now - Duration::days(15),
            line_item_count: 2,
            subtotal_cents: 1098,
            discount_cents: 0,
            total_cents: 1098,
            cash_received_cents: Some(1500),
            change_cents: Some(402),
            method: PaymentMethod::Cash,
            status: InvoiceStatus::Completed,
        },
        vec![
            InvoiceLine {
                item_id: "li-0101-1".to_string(),
                sku: "BEV-COLA-330".to_string(),
                name: "Cola 330ml Can".to_string(),
                unit_price_cents: 299,
                quantity: 1,
                line_total_cents: 299,
            },
            InvoiceLine {
                item_id: "li-0101-2".to_string(),
                sku: "FRS-EGGS-12".to_string(),
                name: "Free Range Eggs x12".to_string(),
                unit_price_cents: 799,
                quantity: 1,
                line_total_cents: 799,
            },
        ],
    );

    store.append(
        Invoice {
            id: Uuid::new_v4().to_string(),
            number: "INV-20260818-0042".to_string(),
            date: now - Duration::days(7),
            line_item_count: 2,
            subtotal_cents: 2497,
            discount_cents: 250,
            total_cents: 2247,
            cash_received_cents: None,
            change_cents: None,
            method: PaymentMethod::StaffCredit,
            status: InvoiceStatus::Completed,
        },
        vec![
            InvoiceLine {
                item_id: "li-0042-1".to_string(),
                sku: "PAN-OIL-1L".to_string(),
                name: "Sunflower Oil 1L".to_string(),
                unit_price_cents: 1249,
                quantity: 1,
                line_total_cents: 1249,
            },
            InvoiceLine {
                item_id: "li-0042-2".to_string(),
                sku: "PAN-RICE-1KG".to_string(),
                name: "Basmati Rice 1kg".to_string(),
                unit_price_cents: 899,
                quantity: 1,
                line_total_cents: 899,
            },
        ],
    );

    store.append(
        Invoice {
            id: Uuid::new_v4().to_string(),
            number: "INV-20260824-0007".to_string(),
            date: now - Duration::days(1),
            line_item_count: 1,
            subtotal_cents: 1198,
            discount_cents: 0,
            total_cents: 1198,
            cash_received_cents: Some(1200),
            change_cents: Some(2),
            method: PaymentMethod::Cash,
            status: InvoiceStatus::Completed,
        },
        vec![InvoiceLine {
            item_id: "li-0007-1".to_string(),
            sku: "FRS-BREAD-LOAF".to_string(),
            name: "Sourdough Loaf".to_string(),
            unit_price_cents: 599,
            quantity: 2,
            line_total_cents: 1198,
        }],
    );

    store
}

/// Credit balances for the fixture staff and customers.
pub fn fixture_credit_book() -> CreditBook {
    CreditBook::new()
        .with_staff("staff-ana", 15_000)
        .with_staff("staff-raul", 5_000)
        .with_customer("cust-lopez", 8_000)
        .with_customer("cust-okafor", 2_500)
}
