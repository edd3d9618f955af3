//! # Domain Types
//!
//! Core domain types used throughout Bodega POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Invoice      │   │  InvoiceLine    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  item_id        │       │
//! │  │                 │   │  number (INV-…) │   │                 │       │
//! │  │  sku (business) │   │  date           │   │  sku / name     │       │
//! │  │  name           │   │  totals         │   │  unit_price     │       │
//! │  │  price_cents    │   │  status         │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ PaymentMethod   │   │ InvoiceStatus   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Cash           │   │  Completed      │                             │
//! │  │  StaffCredit    │   │  Refunded       │                             │
//! │  │  CustomerCredit │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Invoice lines freeze the product data (sku, name, unit price) at the
//! moment of sale. The return processor works entirely on these frozen rows,
//! never on the live catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the read-only catalog collaborator.
///
/// The catalog surface is `{ id, name, sku, price }` plus an active flag for
/// soft-deleted products. Barcodes live in a separate barcode→product index,
/// not on the product itself.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown to the operator and on receipts.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Whether product is active (soft delete).
    pub is_active: bool,
}

impl Product {
    /// Creates an active product. Mostly useful for fixtures and tests.
    pub fn new(
        id: impl Into<String>,
        sku: impl Into<String>,
        name: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Product {
            id: id.into(),
            sku: sku.into(),
            name: name.into(),
            price_cents,
            is_active: true,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale is tendered.
///
/// Credit methods debit a pre-established balance instead of collecting cash;
/// the owning staff/customer id travels alongside in the settlement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Debit against a staff member's credit balance.
    StaffCredit,
    /// Debit against a customer's credit balance.
    CustomerCredit,
}

// =============================================================================
// Invoice Status
// =============================================================================

/// The status of an issued invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Sale settled and invoice issued.
    Completed,
    /// A return was processed against this invoice.
    Refunded,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Completed
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// An issued invoice in the history.
///
/// Immutable once generated. The history is an append log fed by the payment
/// finalizer; fixture seeding produces the same shape for development.
///
/// ## Dual-Key Identity
/// `id` is the unique entity key (UUID) the store looks invoices up by;
/// `number` is the human-readable label printed on receipts. Numbers are
/// derived from the issue timestamp and CAN collide across sales, which is
/// why they are never used as the storage key.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique entity id (UUID). The only key the invoice store trusts.
    pub id: String,

    /// Human-readable invoice number, e.g. `INV-20260825-0042`. Display
    /// and search label, not a key.
    pub number: String,

    /// When the invoice was issued.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Number of distinct line items on the invoice.
    pub line_item_count: usize,

    /// Sum of line totals before discount.
    pub subtotal_cents: i64,

    /// Discount amount applied at checkout.
    pub discount_cents: i64,

    /// Final total (subtotal - discount).
    pub total_cents: i64,

    /// For cash tenders: amount the customer handed over.
    pub cash_received_cents: Option<i64>,

    /// For cash tenders: change returned to the customer.
    pub change_cents: Option<i64>,

    /// Payment method used to settle.
    pub method: PaymentMethod,

    /// Invoice status.
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Returns the final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Invoice Line
// =============================================================================

/// A frozen line item on an issued invoice.
///
/// Uses the snapshot pattern: sku, name and unit price are copied at sale
/// time so later catalog edits never rewrite history. The return processor
/// loads these rows to drive per-item return selection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    /// Line item id (UUID), distinct from the product id.
    pub item_id: String,

    /// SKU at time of sale (frozen).
    pub sku: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,

    /// Quantity sold.
    pub quantity: i64,

    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
}

impl InvoiceLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
