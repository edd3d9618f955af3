//! # Return Processor
//!
//! The stateful return/refund workflow for a single return modal.
//!
//! ## Phase Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Return Workflow Phases                              │
//! │                                                                         │
//! │  ┌───────────┐  load(id) hit  ┌─────────┐  submit()  ┌────────────┐    │
//! │  │ Searching │───────────────►│ Loaded  │───────────►│ Submitting │    │
//! │  └───────────┘                └─────────┘            └─────┬──────┘    │
//! │       ▲                           │                        │           │
//! │       │ load(id) miss:            │ select / deselect      ▼           │
//! │       │ NOT_FOUND, phase          │ set_return_quantity  ┌────────┐   │
//! │       └─ unchanged                │ set_reason           │ Closed │   │
//! │                                   │                      └────────┘   │
//! │                                                                         │
//! │  Submission guard: at least one selected item AND a non-empty reason.  │
//! │  A rejected submit leaves phase and selections untouched.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The processor never mutates the invoice history: submission produces a
//! [`ReturnReceipt`] with a synthetic `RET-` id and the refund total, and
//! that is the whole effect. Stock adjustments and refund postings belong
//! to a backend this process does not have yet.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use bodega_core::returns::{clamp_return_quantity, refund_total, return_invoice_id, ReturnSelection};
use bodega_core::types::{Invoice, InvoiceLine};
use bodega_core::validation;

use crate::error::{BillingError, ErrorCode};
use crate::invoices::InvoiceStore;

// =============================================================================
// Return Phase
// =============================================================================

/// Where the return modal currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPhase {
    /// No invoice loaded yet; the operator is typing an invoice id.
    Searching,
    /// Invoice found; items can be selected and quantities adjusted.
    Loaded,
    /// Submission accepted and being finalized.
    Submitting,
    /// Done. The processor accepts no further operations.
    Closed,
}

// =============================================================================
// Return Receipt
// =============================================================================

/// The outcome of a submitted return.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceipt {
    /// Synthetic return label: `RET-<originalNumber>-<timestampMillis>`.
    pub return_id: String,

    /// Entity id of the invoice the return was taken against.
    pub original_invoice_id: String,

    /// Readable number of the original invoice, for the printed slip.
    pub original_invoice_number: String,

    /// Total refund in cents over all selected items.
    pub refund_cents: i64,

    /// Number of distinct items returned.
    pub item_count: usize,

    /// Shared return reason.
    pub reason: String,

    /// When the return was submitted.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
}

// =============================================================================
// Return Processor
// =============================================================================

/// One return modal's state: the loaded invoice, its frozen lines, and the
/// operator's selections.
#[derive(Debug, Clone)]
pub struct ReturnProcessor {
    phase: ReturnPhase,
    invoice: Option<Invoice>,
    lines: Vec<InvoiceLine>,
    selections: Vec<ReturnSelection>,
    reason: String,
}

impl ReturnProcessor {
    /// Creates a processor in the `Searching` phase with a pre-selected
    /// reason (usually empty, forcing the operator to pick one).
    pub fn new(default_reason: impl Into<String>) -> Self {
        ReturnProcessor {
            phase: ReturnPhase::Searching,
            invoice: None,
            lines: Vec::new(),
            selections: Vec::new(),
            reason: default_reason.into(),
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> ReturnPhase {
        self.phase
    }

    /// The loaded invoice, if any.
    pub fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    /// Frozen line items of the loaded invoice.
    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    /// Current selections.
    pub fn selections(&self) -> &[ReturnSelection] {
        &self.selections
    }

    /// The shared return reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Refund total over the current selections, in cents.
    pub fn refund_total_cents(&self) -> i64 {
        refund_total(&self.selections).cents()
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Loads an invoice for return, by entity id or by the readable number
    /// the operator typed off a receipt (newest sale wins on a number).
    ///
    /// A miss surfaces as `NOT_FOUND` and leaves the phase at `Searching`
    /// so the operator can correct the input and retry.
    pub fn load(&mut self, invoice_ref: &str, store: &dyn InvoiceStore) -> Result<(), BillingError> {
        if self.phase != ReturnPhase::Searching {
            return Err(BillingError::invalid_phase(
                "An invoice is already loaded for return",
            ));
        }

        let invoice = store
            .get(invoice_ref)
            .or_else(|| store.find_by_number(invoice_ref))
            .ok_or_else(|| BillingError::not_found("Invoice", invoice_ref))?;
        let lines = store.lines(&invoice.id).unwrap_or_default();

        debug!(
            invoice_id = %invoice.id,
            number = %invoice.number,
            lines = lines.len(),
            "Invoice loaded for return"
        );
        self.invoice = Some(invoice);
        self.lines = lines;
        self.selections.clear();
        self.phase = ReturnPhase::Loaded;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Selection edits
    // -------------------------------------------------------------------------

    /// Sets the shared return reason. Existing selections pick it up too.
    pub fn set_reason(&mut self, reason: &str) {
        self.reason = reason.trim().to_string();
        for sel in &mut self.selections {
            sel.reason = self.reason.clone();
        }
    }

    /// Checks an item for return, defaulted to its FULL original quantity.
    ///
    /// Returns `false` if the item is unknown, already selected, or the
    /// phase is not `Loaded`.
    pub fn select_item(&mut self, item_id: &str) -> bool {
        if self.phase != ReturnPhase::Loaded {
            return false;
        }
        if self.selections.iter().any(|s| s.item_id == item_id) {
            return false;
        }

        match self.lines.iter().find(|l| l.item_id == item_id) {
            Some(line) => {
                self.selections
                    .push(ReturnSelection::from_line(line, self.reason.clone()));
                true
            }
            None => false,
        }
    }

    /// Unchecks an item. Unknown ids are a no-op.
    pub fn deselect_item(&mut self, item_id: &str) {
        self.selections.retain(|s| s.item_id != item_id);
    }

    /// Adjusts the return quantity of a selected item.
    ///
    /// Clamped into `[1, original]`: requests above the original clamp down,
    /// requests below 1 are ignored and leave the selection unchanged.
    /// Returns `true` if the quantity changed.
    pub fn set_return_quantity(&mut self, item_id: &str, requested: i64) -> bool {
        let Some(sel) = self.selections.iter_mut().find(|s| s.item_id == item_id) else {
            return false;
        };
        match clamp_return_quantity(requested, sel.original_quantity) {
            Some(qty) => {
                sel.return_quantity = qty;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Submits the return: `Loaded → Submitting → Closed`.
    ///
    /// ## Guards
    /// - At least one item must be selected
    /// - The shared reason must be non-empty
    ///
    /// A rejected submit changes nothing; the operator fixes the input
    /// and tries again.
    pub fn submit(&mut self) -> Result<ReturnReceipt, BillingError> {
        if self.phase != ReturnPhase::Loaded {
            return Err(BillingError::invalid_phase(
                "No invoice loaded, or the return was already submitted",
            ));
        }

        if self.selections.is_empty() {
            return Err(BillingError::new(
                ErrorCode::ValidationError,
                "Select at least one item to return",
            ));
        }

        let reason = validation::validate_return_reason(&self.reason)
            .map_err(|e| BillingError::validation(e.to_string()))?;

        // Guards passed: the submission itself cannot fail from here.
        self.phase = ReturnPhase::Submitting;

        let (original_id, original_number) = self
            .invoice
            .as_ref()
            .map(|inv| (inv.id.clone(), inv.number.clone()))
            .unwrap_or_default();
        let now = Utc::now();
        let receipt = ReturnReceipt {
            return_id: return_invoice_id(&original_number, now),
            original_invoice_id: original_id,
            original_invoice_number: original_number,
            refund_cents: self.refund_total_cents(),
            item_count: self.selections.len(),
            reason,
            submitted_at: now,
        };

        info!(
            return_id = %receipt.return_id,
            refund = receipt.refund_cents,
            items = receipt.item_count,
            "Return submitted"
        );

        self.phase = ReturnPhase::Closed;
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoices::{InMemoryInvoiceStore, InvoiceStore};
    use bodega_core::types::{InvoiceStatus, PaymentMethod};
    use chrono::TimeZone;

    fn seeded_store() -> InMemoryInvoiceStore {
        let invoice = Invoice {
            id: "sale-7c1f".to_string(),
            number: "INV-20260820-0001".to_string(),
            date: Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap(),
            line_item_count: 4,
            subtotal_cents: 4000,
            discount_cents: 0,
            total_cents: 4000,
            cash_received_cents: Some(4000),
            change_cents: Some(0),
            method: PaymentMethod::Cash,
            status: InvoiceStatus::Completed,
        };
        let lines = (1..=4)
            .map(|n| InvoiceLine {
                item_id: format!("i-{}", n),
                sku: format!("SKU-{}", n),
                name: format!("Item {}", n),
                unit_price_cents: 500,
                quantity: 2,
                line_total_cents: 1000,
            })
            .collect();

        let mut store = InMemoryInvoiceStore::new();
        store.append(invoice, lines);
        store
    }

    fn loaded() -> (ReturnProcessor, InMemoryInvoiceStore) {
        let store = seeded_store();
        let mut rp = ReturnProcessor::new("");
        rp.load("sale-7c1f", &store).unwrap();
        (rp, store)
    }

    #[test]
    fn test_load_miss_stays_searching() {
        let store = seeded_store();
        let mut rp = ReturnProcessor::new("");

        let err = rp.load("INV-NOPE", &store).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(rp.phase(), ReturnPhase::Searching);

        // Operator corrects the input and retries on the same processor
        rp.load("sale-7c1f", &store).unwrap();
        assert_eq!(rp.phase(), ReturnPhase::Loaded);
        assert_eq!(rp.lines().len(), 4);
    }

    #[test]
    fn test_load_by_typed_receipt_number() {
        let store = seeded_store();
        let mut rp = ReturnProcessor::new("");

        rp.load("INV-20260820-0001", &store).unwrap();
        assert_eq!(rp.phase(), ReturnPhase::Loaded);
        assert_eq!(rp.invoice().unwrap().id, "sale-7c1f");
    }

    #[test]
    fn test_select_defaults_to_full_quantity() {
        let (mut rp, _) = loaded();

        assert!(rp.select_item("i-1"));
        assert_eq!(rp.selections().len(), 1);
        assert_eq!(rp.selections()[0].return_quantity, 2);
        assert_eq!(rp.refund_total_cents(), 1000);

        // Double-select and unknown ids do nothing
        assert!(!rp.select_item("i-1"));
        assert!(!rp.select_item("i-99"));
        assert_eq!(rp.selections().len(), 1);
    }

    #[test]
    fn test_quantity_clamps_to_original() {
        // Original qty 2, operator types 5: clamps to 2, refund = 2 × $5.00
        let (mut rp, _) = loaded();
        rp.select_item("i-1");

        assert!(rp.set_return_quantity("i-1", 5));
        assert_eq!(rp.selections()[0].return_quantity, 2);
        assert_eq!(rp.refund_total_cents(), 1000);

        assert!(rp.set_return_quantity("i-1", 1));
        assert_eq!(rp.refund_total_cents(), 500);

        // Below 1 is ignored, quantity stays at 1
        assert!(!rp.set_return_quantity("i-1", 0));
        assert_eq!(rp.selections()[0].return_quantity, 1);
    }

    #[test]
    fn test_deselect() {
        let (mut rp, _) = loaded();
        rp.select_item("i-1");
        rp.select_item("i-2");

        rp.deselect_item("i-1");
        assert_eq!(rp.selections().len(), 1);
        assert_eq!(rp.selections()[0].item_id, "i-2");
    }

    #[test]
    fn test_submit_requires_selection_and_reason() {
        let (mut rp, _) = loaded();

        // No selection
        let err = rp.submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(rp.phase(), ReturnPhase::Loaded);

        // Selection but empty reason
        rp.select_item("i-1");
        let err = rp.submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(rp.phase(), ReturnPhase::Loaded, "rejection changes nothing");
        assert_eq!(rp.selections().len(), 1);

        // Both present
        rp.set_reason("damaged");
        let receipt = rp.submit().unwrap();
        assert_eq!(receipt.refund_cents, 1000);
        assert_eq!(receipt.item_count, 1);
        assert_eq!(receipt.reason, "damaged");
        assert_eq!(rp.phase(), ReturnPhase::Closed);
    }

    #[test]
    fn test_receipt_id_format() {
        let (mut rp, _) = loaded();
        rp.select_item("i-1");
        rp.set_reason("wrong size");

        let receipt = rp.submit().unwrap();
        assert!(receipt.return_id.starts_with("RET-INV-20260820-0001-"));
        assert_eq!(receipt.original_invoice_id, "sale-7c1f");
        assert_eq!(receipt.original_invoice_number, "INV-20260820-0001");
    }

    #[test]
    fn test_closed_processor_rejects_everything() {
        let (mut rp, store) = loaded();
        rp.select_item("i-1");
        rp.set_reason("damaged");
        rp.submit().unwrap();

        assert_eq!(rp.submit().unwrap_err().code, ErrorCode::InvalidPhase);
        assert_eq!(
            rp.load("sale-7c1f", &store).unwrap_err().code,
            ErrorCode::InvalidPhase
        );
        assert!(!rp.select_item("i-2"));
    }

    #[test]
    fn test_set_reason_propagates_to_selections() {
        let (mut rp, _) = loaded();
        rp.select_item("i-1");
        rp.select_item("i-2");

        rp.set_reason("expired");
        assert!(rp.selections().iter().all(|s| s.reason == "expired"));
    }

    #[test]
    fn test_history_is_untouched_by_return() {
        let (mut rp, store) = loaded();
        rp.select_item("i-1");
        rp.set_reason("damaged");
        rp.submit().unwrap();

        // Simulation only: the original invoice is still there, unchanged
        let original = store.get("sale-7c1f").unwrap();
        assert_eq!(original.status, InvoiceStatus::Completed);
        assert_eq!(store.len(), 1);
    }
}
