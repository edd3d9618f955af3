//! # Return Math
//!
//! Pure data and arithmetic for the return/refund workflow: per-item return
//! selections, quantity clamping, and refund totals. The stateful workflow
//! (phases, submission guards) lives in `bodega-billing::returns`; this
//! module is just the math it leans on.
//!
//! ## Return Selection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Invoice line  ──check──►  ReturnSelection                              │
//! │                            • return_quantity defaults to the FULL       │
//! │                              original quantity                          │
//! │                            • reason defaults to the global reason       │
//! │                                                                         │
//! │  Per-row stepper ────────► clamp_return_quantity()                      │
//! │                            • above original: clamps down                │
//! │                            • below 1: ignored (selection unchanged)     │
//! │                                                                         │
//! │  Uncheck / close modal ──► selection destroyed                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::InvoiceLine;

// =============================================================================
// Return Selection
// =============================================================================

/// One invoice line selected for return, with the quantity to take back.
///
/// Invariant: `1 ≤ return_quantity ≤ original_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSelection {
    /// Invoice line item id.
    pub item_id: String,

    /// SKU snapshot from the invoice line.
    pub sku: String,

    /// Name snapshot from the invoice line.
    pub name: String,

    /// Unit price snapshot in cents.
    pub unit_price_cents: i64,

    /// Quantity originally sold on the invoice.
    pub original_quantity: i64,

    /// Quantity being returned. Defaults to `original_quantity`.
    pub return_quantity: i64,

    /// Return reason for this item.
    pub reason: String,
}

impl ReturnSelection {
    /// Creates a selection for an invoice line, defaulted to the full
    /// original quantity and the given (global) reason.
    pub fn from_line(line: &InvoiceLine, reason: impl Into<String>) -> Self {
        ReturnSelection {
            item_id: line.item_id.clone(),
            sku: line.sku.clone(),
            name: line.name.clone(),
            unit_price_cents: line.unit_price_cents,
            original_quantity: line.quantity,
            return_quantity: line.quantity,
            reason: reason.into(),
        }
    }

    /// Refund amount for this selection: `unit_price × return_quantity`.
    pub fn refund(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.return_quantity)
    }
}

// =============================================================================
// Clamping and Totals
// =============================================================================

/// Clamps a requested return quantity into `[1, original]`.
///
/// ## Returns
/// - `None` if `requested < 1` — the request is ignored, the selection keeps
///   its previous quantity
/// - `Some(original)` if `requested > original` — clamps down
/// - `Some(requested)` otherwise
///
/// ## Example
/// ```rust
/// use bodega_core::returns::clamp_return_quantity;
///
/// assert_eq!(clamp_return_quantity(5, 2), Some(2)); // clamps to original
/// assert_eq!(clamp_return_quantity(1, 2), Some(1));
/// assert_eq!(clamp_return_quantity(0, 2), None);    // ignored
/// ```
pub fn clamp_return_quantity(requested: i64, original: i64) -> Option<i64> {
    if requested < 1 {
        return None;
    }
    Some(requested.min(original))
}

/// Refund total over all selections: `Σ unit_price × return_quantity`.
pub fn refund_total(selections: &[ReturnSelection]) -> Money {
    selections
        .iter()
        .fold(Money::zero(), |acc, s| acc + s.refund())
}

/// Builds the synthetic return-invoice id: `RET-<originalId>-<timestampMillis>`.
pub fn return_invoice_id(original_id: &str, at: DateTime<Utc>) -> String {
    format!("RET-{}-{}", original_id, at.timestamp_millis())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(item_id: &str, unit_price_cents: i64, quantity: i64) -> InvoiceLine {
        InvoiceLine {
            item_id: item_id.to_string(),
            sku: format!("SKU-{}", item_id),
            name: format!("Item {}", item_id),
            unit_price_cents,
            quantity,
            line_total_cents: unit_price_cents * quantity,
        }
    }

    #[test]
    fn test_selection_defaults_to_full_quantity() {
        let l = line("i-1", 450, 3);
        let sel = ReturnSelection::from_line(&l, "damaged");

        assert_eq!(sel.return_quantity, 3);
        assert_eq!(sel.reason, "damaged");
        assert_eq!(sel.refund().cents(), 1350);
    }

    #[test]
    fn test_clamp_above_original() {
        // Original qty 2, request 5 → clamps to 2, refund = unit_price × 2
        assert_eq!(clamp_return_quantity(5, 2), Some(2));

        let l = line("i-1", 450, 2);
        let mut sel = ReturnSelection::from_line(&l, "wrong size");
        sel.return_quantity = clamp_return_quantity(5, sel.original_quantity).unwrap();
        assert_eq!(sel.refund().cents(), 900);
    }

    #[test]
    fn test_clamp_below_one_ignored() {
        assert_eq!(clamp_return_quantity(0, 4), None);
        assert_eq!(clamp_return_quantity(-3, 4), None);
    }

    #[test]
    fn test_clamp_within_range() {
        assert_eq!(clamp_return_quantity(3, 4), Some(3));
        assert_eq!(clamp_return_quantity(4, 4), Some(4));
        assert_eq!(clamp_return_quantity(1, 4), Some(1));
    }

    #[test]
    fn test_refund_total() {
        let sels = vec![
            ReturnSelection::from_line(&line("i-1", 450, 2), "damaged"),
            ReturnSelection::from_line(&line("i-2", 1000, 1), "damaged"),
        ];
        assert_eq!(refund_total(&sels).cents(), 1900);
        assert_eq!(refund_total(&[]).cents(), 0);
    }

    #[test]
    fn test_return_invoice_id_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let id = return_invoice_id("INV-20260825-0001", at);
        assert_eq!(
            id,
            format!("RET-INV-20260825-0001-{}", at.timestamp_millis())
        );
    }
}
