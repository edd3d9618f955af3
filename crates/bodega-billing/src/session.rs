//! # Billing Session
//!
//! The stateful heart of the billing screen: one session per screen mount,
//! owning the cart ledger, the pending search query, and the checkout state
//! machine.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Billing Session Lifecycle                            │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Tender  │────►│ Invoice  │       │
//! │  │  Cart    │     │          │     │  Modal   │     │ Appended │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   scan / add        checkout()        cart reset       │
//! │                   set_quantity      Idle→Settling     query cleared    │
//! │                   set_discount           │            back to Idle     │
//! │                        │                 │                              │
//! │                        ▼                 ▼                              │
//! │                   F3 reset ◄──── failure: Settling→Idle,               │
//! │                                  cart UNTOUCHED (operator retries)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single operator, event-driven: one command runs at a time. The only
//! concurrency concern is the in-flight settlement, guarded by the
//! `Settling` phase (single-flight per action, not a general primitive).

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use bodega_core::cart::{Cart, CartTotals};
use bodega_core::types::{Invoice, InvoiceLine, InvoiceStatus, PaymentMethod, Product};
use bodega_core::{lookup, validation, CoreError};

use crate::catalog::Catalog;
use crate::config::BillingConfig;
use crate::error::{BillingError, ErrorCode};
use crate::invoices::{generate_invoice_number, HistoryFilter, InvoiceStore};
use crate::returns::ReturnProcessor;
use crate::settlement::{CreditBook, SettlementGateway, SettlementRequest};

// =============================================================================
// Checkout Phase
// =============================================================================

/// The checkout state machine: `Idle → Settling → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// No settlement in flight; cart is editable.
    Idle,
    /// Settlement in flight; checkout and hotkeys are rejected.
    Settling,
}

/// Restores `Idle` when dropped, so the phase cannot stick at `Settling`
/// even if the checkout future is cancelled mid-await (caller-side
/// `select!`/timeout dropping the future).
struct PhaseReset<'a>(&'a mut CheckoutPhase);

impl Drop for PhaseReset<'_> {
    fn drop(&mut self) {
        *self.0 = CheckoutPhase::Idle;
    }
}

// =============================================================================
// Scan Outcome
// =============================================================================

/// Result of a scan/search submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ScanOutcome {
    /// Product resolved and added to the cart; the search field is cleared.
    Added { totals: CartTotals },
    /// Nothing matched. NOT an error: the screen opens the full catalog
    /// browser as the fallback.
    NotFound,
}

// =============================================================================
// Tender Request
// =============================================================================

/// Operator's tender choice handed to `checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderRequest {
    pub method: PaymentMethod,
    pub staff_id: Option<String>,
    pub customer_id: Option<String>,
    /// For cash: amount the customer handed over.
    pub cash_received_cents: Option<i64>,
}

impl TenderRequest {
    /// Cash tender with the amount received.
    pub fn cash(cash_received_cents: i64) -> Self {
        TenderRequest {
            method: PaymentMethod::Cash,
            staff_id: None,
            customer_id: None,
            cash_received_cents: Some(cash_received_cents),
        }
    }

    /// Staff-credit tender.
    pub fn staff_credit(staff_id: impl Into<String>) -> Self {
        TenderRequest {
            method: PaymentMethod::StaffCredit,
            staff_id: Some(staff_id.into()),
            customer_id: None,
            cash_received_cents: None,
        }
    }

    /// Customer-credit tender.
    pub fn customer_credit(customer_id: impl Into<String>) -> Self {
        TenderRequest {
            method: PaymentMethod::CustomerCredit,
            staff_id: None,
            customer_id: Some(customer_id.into()),
            cash_received_cents: None,
        }
    }
}

// =============================================================================
// Hotkeys
// =============================================================================

/// The keyboard surface worth preserving as a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotKey {
    /// F3: reset the cart.
    ResetCart,
    /// F6: open the payment modal (only if the cart is non-empty).
    OpenPayment,
}

impl HotKey {
    /// Maps a DOM-style key name to a hotkey.
    pub fn from_key(key: &str) -> Option<HotKey> {
        match key {
            "F3" => Some(HotKey::ResetCart),
            "F6" => Some(HotKey::OpenPayment),
            _ => None,
        }
    }
}

/// What a hotkey press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HotKeyOutcome {
    /// F3 handled: cart emptied, discount zeroed.
    CartReset,
    /// F6 handled: the screen should open the tender modal.
    PaymentOpened,
    /// Nothing happened (empty cart on F6, or a settlement in flight).
    Ignored,
}

// =============================================================================
// Billing Session
// =============================================================================

/// One billing screen's state: cart, query, phase, and collaborators.
///
/// The catalog and invoice store are trait objects so the in-memory fixtures
/// can be swapped for a real backend; the gateway is a type parameter because
/// its trait is async.
pub struct BillingSession<G> {
    cart: Cart,
    search_query: String,
    phase: CheckoutPhase,
    catalog: Box<dyn Catalog + Send>,
    invoices: Box<dyn InvoiceStore + Send>,
    gateway: G,
    credit: CreditBook,
    config: BillingConfig,
}

impl<G: SettlementGateway> BillingSession<G> {
    /// Creates a fresh session with an empty cart.
    pub fn new(
        catalog: Box<dyn Catalog + Send>,
        invoices: Box<dyn InvoiceStore + Send>,
        gateway: G,
        credit: CreditBook,
        config: BillingConfig,
    ) -> Self {
        BillingSession {
            cart: Cart::new(),
            search_query: String::new(),
            phase: CheckoutPhase::Idle,
            catalog,
            invoices,
            gateway,
            credit,
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived pricing summary.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Pending search field contents.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current checkout phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Full catalog, for the browser fallback after a lookup miss.
    pub fn browse_catalog(&self) -> Vec<Product> {
        self.catalog.all()
    }

    /// Browses the invoice history.
    pub fn history(&self, filter: &HistoryFilter) -> Vec<Invoice> {
        self.invoices.search(filter)
    }

    /// Direct access to the invoice store (return processor loads from it).
    pub fn invoice_store(&self) -> &dyn InvoiceStore {
        self.invoices.as_ref()
    }

    /// Opens a return workflow pre-configured with the default reason.
    pub fn begin_return(&self) -> ReturnProcessor {
        ReturnProcessor::new(&self.config.default_return_reason)
    }

    // -------------------------------------------------------------------------
    // Scan / lookup
    // -------------------------------------------------------------------------

    /// Submits the search field: barcode first, then first text match.
    ///
    /// ## Behavior
    /// - Barcode path (10+ digits): barcode index → catalog
    /// - Text path: case-insensitive substring on name OR sku, first match
    /// - Hit: product added to the cart, search field cleared
    /// - Miss: `ScanOutcome::NotFound`; the query is kept so the catalog
    ///   browser can open pre-filtered
    pub fn scan(&mut self, input: &str) -> Result<ScanOutcome, BillingError> {
        let query = validation::validate_search_query(input).map_err(CoreError::from)?;
        self.search_query = query.clone();
        debug!(query = %query, "scan");

        if query.is_empty() {
            return Ok(ScanOutcome::NotFound);
        }

        let hit = if lookup::is_barcode_query(&query) {
            self.catalog.get_by_barcode(&query)
        } else {
            self.catalog.first_match(&query)
        };

        match hit {
            Some(product) => {
                self.add_to_cart(&product)?;
                self.search_query.clear();
                info!(product_id = %product.id, sku = %product.sku, "Scan hit, added to cart");
                Ok(ScanOutcome::Added {
                    totals: self.cart.totals(),
                })
            }
            None => {
                debug!(query = %query, "Scan miss, falling back to catalog browser");
                Ok(ScanOutcome::NotFound)
            }
        }
    }

    /// Adds a product picked from the catalog browser.
    pub fn add_product_by_id(&mut self, product_id: &str) -> Result<CartTotals, BillingError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| BillingError::not_found("Product", product_id))?;
        self.add_to_cart(&product)?;
        Ok(self.cart.totals())
    }

    fn add_to_cart(&mut self, product: &Product) -> Result<(), BillingError> {
        // Cap check only applies when a new line would be appended;
        // merging into an existing line never grows the cart.
        let merging = self.cart.lines.iter().any(|l| l.product_id == product.id);
        if !merging {
            validation::validate_cart_size(self.cart.line_count()).map_err(CoreError::from)?;
        }
        self.cart.add_product(product);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cart edits
    // -------------------------------------------------------------------------

    /// Sets a line's quantity from the stepper. Zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &str, qty: i64) -> Result<CartTotals, BillingError> {
        if qty > 0 {
            validation::validate_quantity(qty).map_err(CoreError::from)?;
        }
        self.cart.set_quantity(product_id, qty);
        Ok(self.cart.totals())
    }

    /// Removes a line unconditionally.
    pub fn remove_line(&mut self, product_id: &str) -> CartTotals {
        self.cart.remove_line(product_id);
        self.cart.totals()
    }

    /// Applies the free-form discount field. Invalid input falls back to 0%.
    pub fn set_discount_input(&mut self, input: &str) -> CartTotals {
        let bps = validation::parse_discount_percent(input);
        if bps > 10_000 {
            // Permitted but unusual: the total goes negative
            warn!(discount_bps = bps, "Discount above 100% applied");
        }
        self.cart.set_discount_bps(bps);
        self.cart.totals()
    }

    /// Empties the cart, zeroes the discount, clears the search field.
    pub fn reset_cart(&mut self) -> CartTotals {
        debug!("reset cart");
        self.cart.reset();
        self.search_query.clear();
        self.cart.totals()
    }

    // -------------------------------------------------------------------------
    // Hotkeys
    // -------------------------------------------------------------------------

    /// Applies a hotkey press.
    ///
    /// Hotkeys are ignored while a settlement is in flight so F3 cannot
    /// clear a cart that is being settled.
    pub fn apply_hotkey(&mut self, key: HotKey) -> HotKeyOutcome {
        if self.phase == CheckoutPhase::Settling {
            return HotKeyOutcome::Ignored;
        }

        match key {
            HotKey::ResetCart => {
                self.reset_cart();
                HotKeyOutcome::CartReset
            }
            HotKey::OpenPayment => {
                if self.cart.is_empty() {
                    HotKeyOutcome::Ignored
                } else {
                    HotKeyOutcome::PaymentOpened
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Finalizes the sale: `Idle → Settling → Idle`.
    ///
    /// ## Guards (checked before any transition)
    /// - A settlement already in flight → `SETTLEMENT_IN_PROGRESS`
    /// - Empty cart → rejected with a message, no state change
    /// - Credit tenders must carry their id; customer credit must be within
    ///   the outstanding balance
    ///
    /// ## On success
    /// The invoice is appended to the history (the history is fed by the
    /// finalizer, not generated independently), the cart is reset, the
    /// discount and pending query are cleared.
    ///
    /// ## On failure
    /// The phase returns to `Idle` and the cart is left untouched so the
    /// operator can retry or change tender. The phase restore is drop-safe:
    /// a caller cancelling the returned future mid-settlement still leaves
    /// the session at `Idle`.
    pub async fn checkout(&mut self, tender: TenderRequest) -> Result<Invoice, BillingError> {
        if self.phase == CheckoutPhase::Settling {
            return Err(BillingError::new(
                ErrorCode::SettlementInProgress,
                "A settlement is already in progress",
            ));
        }

        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let totals = self.cart.totals();
        self.validate_tender(&tender, totals.total_cents)?;

        let request = SettlementRequest {
            lines: self.cart.lines.clone(),
            subtotal_cents: totals.subtotal_cents,
            discount_cents: totals.discount_cents,
            total_cents: totals.total_cents,
            method: tender.method,
            staff_id: tender.staff_id.clone(),
            customer_id: tender.customer_id.clone(),
        };

        self.phase = CheckoutPhase::Settling;
        debug!(total = totals.total_cents, method = ?tender.method, "Checkout: settling");

        let timeout = Duration::from_millis(self.config.settlement_timeout_ms);
        let outcome = {
            // Lifts the in-flight guard on every exit, including cancellation
            let _reset = PhaseReset(&mut self.phase);
            tokio::time::timeout(timeout, self.gateway.settle(&request)).await
        };

        let receipt = match outcome {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(err)) => return Err(err.into()),
            Err(_elapsed) => {
                return Err(crate::settlement::SettlementError::Timeout {
                    secs: timeout.as_secs().max(1),
                }
                .into())
            }
        };

        let invoice = self.issue_invoice(&request, &tender);
        info!(
            invoice_id = %invoice.id,
            number = %invoice.number,
            reference = %receipt.reference,
            total = invoice.total_cents,
            "Sale settled"
        );

        // Settlement succeeded: clear everything for the next sale.
        self.cart.reset();
        self.search_query.clear();

        Ok(invoice)
    }

    fn validate_tender(&self, tender: &TenderRequest, total_cents: i64) -> Result<(), BillingError> {
        match tender.method {
            PaymentMethod::Cash => {
                if let Some(received) = tender.cash_received_cents {
                    if received < total_cents {
                        return Err(BillingError::new(
                            ErrorCode::PaymentError,
                            "Cash received is less than the total",
                        ));
                    }
                }
                Ok(())
            }
            PaymentMethod::StaffCredit => {
                let staff_id = tender.staff_id.as_deref().ok_or_else(|| {
                    BillingError::validation("staff id is required for staff credit")
                })?;
                let balance = self.credit.staff_balance(staff_id).ok_or_else(|| {
                    BillingError::not_found("Staff credit account", staff_id)
                })?;
                validation::validate_credit_amount(total_cents, balance)
                    .map_err(|e| BillingError::new(ErrorCode::PaymentError, e.to_string()))
            }
            PaymentMethod::CustomerCredit => {
                let customer_id = tender.customer_id.as_deref().ok_or_else(|| {
                    BillingError::validation("customer id is required for customer credit")
                })?;
                let balance = self.credit.customer_balance(customer_id).ok_or_else(|| {
                    BillingError::not_found("Customer credit account", customer_id)
                })?;
                validation::validate_credit_amount(total_cents, balance)
                    .map_err(|e| BillingError::new(ErrorCode::PaymentError, e.to_string()))
            }
        }
    }

    fn issue_invoice(&mut self, request: &SettlementRequest, tender: &TenderRequest) -> Invoice {
        let now = Utc::now();
        let change = tender
            .cash_received_cents
            .map(|received| received - request.total_cents);

        let invoice = Invoice {
            // Dual-key identity: UUID is the store key, the readable
            // number is the receipt label (numbers can repeat)
            id: Uuid::new_v4().to_string(),
            number: generate_invoice_number(now),
            date: now,
            line_item_count: request.lines.len(),
            subtotal_cents: request.subtotal_cents,
            discount_cents: request.discount_cents,
            total_cents: request.total_cents,
            cash_received_cents: tender.cash_received_cents,
            change_cents: change,
            method: request.method,
            status: InvoiceStatus::Completed,
        };

        let lines: Vec<InvoiceLine> = request
            .lines
            .iter()
            .map(|l| InvoiceLine {
                item_id: Uuid::new_v4().to_string(),
                sku: l.sku.clone(),
                name: l.name.clone(),
                unit_price_cents: l.unit_price_cents,
                quantity: l.quantity,
                line_total_cents: l.line_total_cents,
            })
            .collect();

        self.invoices.append(invoice.clone(), lines);
        invoice
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::invoices::InMemoryInvoiceStore;
    use crate::settlement::SimulatedGateway;
    use std::collections::HashMap;

    fn catalog() -> InMemoryCatalog {
        let products = vec![
            Product::new("p-1", "BEV-COLA-330", "Cola 330ml", 299),
            Product::new("p-2", "SNK-CHIPS", "Chips Classic", 249),
            Product::new("p-3", "CAF-001", "House Coffee", 1000),
        ];
        let mut index = HashMap::new();
        index.insert("8901234567890".to_string(), "p-1".to_string());
        InMemoryCatalog::new(products, index)
    }

    fn session(gateway: SimulatedGateway) -> BillingSession<SimulatedGateway> {
        BillingSession::new(
            Box::new(catalog()),
            Box::new(InMemoryInvoiceStore::new()),
            gateway,
            CreditBook::new()
                .with_staff("s-1", 10_000)
                .with_customer("c-1", 2_000),
            BillingConfig::default(),
        )
    }

    #[test]
    fn test_scan_barcode_adds_and_clears_query() {
        let mut s = session(SimulatedGateway::instant());
        let outcome = s.scan("8901234567890").unwrap();

        assert!(matches!(outcome, ScanOutcome::Added { .. }));
        assert_eq!(s.cart().line_count(), 1);
        assert_eq!(s.search_query(), "", "search field must clear on a hit");
    }

    #[test]
    fn test_scan_text_first_match() {
        let mut s = session(SimulatedGateway::instant());
        s.scan("cola").unwrap();
        assert_eq!(s.cart().lines[0].product_id, "p-1");
    }

    #[test]
    fn test_scan_miss_keeps_query_for_browser() {
        let mut s = session(SimulatedGateway::instant());
        let outcome = s.scan("espresso").unwrap();

        assert!(matches!(outcome, ScanOutcome::NotFound));
        assert!(s.cart().is_empty());
        assert_eq!(s.search_query(), "espresso");
        assert_eq!(s.browse_catalog().len(), 3);
    }

    #[test]
    fn test_discount_input_parsing() {
        let mut s = session(SimulatedGateway::instant());
        s.scan("coffee").unwrap(); // $10.00

        let totals = s.set_discount_input("10");
        assert_eq!(totals.discount_cents, 100);

        let totals = s.set_discount_input("garbage");
        assert_eq!(totals.discount_cents, 0, "invalid entry defaults to 0");
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_guard() {
        let mut s = session(SimulatedGateway::instant());

        let err = s.checkout(TenderRequest::cash(1000)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(s.phase(), CheckoutPhase::Idle, "no Settling transition");
        assert!(s.cart().is_empty());
        assert!(s.history(&HistoryFilter::all()).is_empty());
    }

    #[tokio::test]
    async fn test_checkout_success_clears_and_appends() {
        let mut s = session(SimulatedGateway::instant());
        s.scan("coffee").unwrap();
        s.set_quantity("p-3", 2).unwrap();
        s.set_discount_input("10");

        let invoice = s.checkout(TenderRequest::cash(2000)).await.unwrap();

        assert_eq!(invoice.subtotal_cents, 2000);
        assert_eq!(invoice.discount_cents, 200);
        assert_eq!(invoice.total_cents, 1800);
        assert_eq!(invoice.cash_received_cents, Some(2000));
        assert_eq!(invoice.change_cents, Some(200));
        assert!(invoice.number.starts_with("INV-"));
        assert_ne!(invoice.id, invoice.number);

        // Finalizer feeds the history
        let history = s.history(&HistoryFilter::all());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, invoice.id);
        assert_eq!(s.invoice_store().lines(&invoice.id).unwrap().len(), 1);

        // Cart, discount, and pending query all cleared
        assert!(s.cart().is_empty());
        assert_eq!(s.cart().discount_bps, 0);
        assert_eq!(s.search_query(), "");
        assert_eq!(s.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn test_invoice_ids_unique_across_sales() {
        // Readable numbers can repeat within a day; entity ids never do,
        // so each sale stays retrievable with its own lines
        let mut s = session(SimulatedGateway::instant());

        s.scan("cola").unwrap();
        let a = s.checkout(TenderRequest::cash(1000)).await.unwrap();
        s.scan("coffee").unwrap();
        let b = s.checkout(TenderRequest::cash(2000)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(s.invoice_store().get(&a.id).unwrap().total_cents, 299);
        assert_eq!(s.invoice_store().get(&b.id).unwrap().total_cents, 1000);
        assert_eq!(s.invoice_store().lines(&b.id).unwrap()[0].sku, "CAF-001");
    }

    #[tokio::test]
    async fn test_cancelled_checkout_restores_idle() {
        let mut s = BillingSession::new(
            Box::new(catalog()),
            Box::new(InMemoryInvoiceStore::new()),
            SimulatedGateway::with_delay(Duration::from_millis(200)),
            CreditBook::new(),
            BillingConfig::default(),
        );
        s.scan("coffee").unwrap();

        // Caller-side cancellation drops the in-flight checkout future
        let cancelled = tokio::time::timeout(
            Duration::from_millis(20),
            s.checkout(TenderRequest::cash(2000)),
        )
        .await;
        assert!(cancelled.is_err());

        assert_eq!(
            s.phase(),
            CheckoutPhase::Idle,
            "phase must not stick at Settling after a dropped checkout"
        );
        assert_eq!(s.cart().line_count(), 1);
        assert_eq!(
            s.apply_hotkey(HotKey::OpenPayment),
            HotKeyOutcome::PaymentOpened
        );

        // The same cart settles fine on retry
        let invoice = s.checkout(TenderRequest::cash(2000)).await.unwrap();
        assert_eq!(invoice.subtotal_cents, 1000);
    }

    #[tokio::test]
    async fn test_checkout_rejection_keeps_cart() {
        let mut s = session(SimulatedGateway::rejecting("card declined"));
        s.scan("coffee").unwrap();

        let err = s.checkout(TenderRequest::cash(2000)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SettlementFailed);

        // Failure branch: cart untouched, phase back to Idle, no invoice
        assert_eq!(s.cart().line_count(), 1);
        assert_eq!(s.phase(), CheckoutPhase::Idle);
        assert!(s.history(&HistoryFilter::all()).is_empty());
    }

    #[tokio::test]
    async fn test_checkout_timeout() {
        let mut s = BillingSession::new(
            Box::new(catalog()),
            Box::new(InMemoryInvoiceStore::new()),
            SimulatedGateway::with_delay(Duration::from_millis(200)),
            CreditBook::new(),
            BillingConfig {
                settlement_timeout_ms: 20,
                ..BillingConfig::default()
            },
        );
        s.scan("coffee").unwrap();

        let err = s.checkout(TenderRequest::cash(2000)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SettlementFailed);
        assert!(err.message.contains("timed out"));
        assert_eq!(s.cart().line_count(), 1);
        assert_eq!(s.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn test_customer_credit_bounds() {
        // Balance for c-1 is $20.00; a $30.00 sale must be rejected before
        // any settlement attempt
        let mut s = session(SimulatedGateway::instant());
        s.scan("coffee").unwrap();
        s.set_quantity("p-3", 3).unwrap(); // $30.00

        let err = s
            .checkout(TenderRequest::customer_credit("c-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(s.cart().line_count(), 1);

        // Within balance settles fine
        s.set_quantity("p-3", 2).unwrap(); // $20.00 == balance
        let invoice = s
            .checkout(TenderRequest::customer_credit("c-1"))
            .await
            .unwrap();
        assert_eq!(invoice.method, PaymentMethod::CustomerCredit);
    }

    #[tokio::test]
    async fn test_credit_tender_requires_id() {
        let mut s = session(SimulatedGateway::instant());
        s.scan("cola").unwrap();

        let tender = TenderRequest {
            method: PaymentMethod::CustomerCredit,
            staff_id: None,
            customer_id: None,
            cash_received_cents: None,
        };
        let err = s.checkout(tender).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_cash_under_total_rejected() {
        let mut s = session(SimulatedGateway::instant());
        s.scan("coffee").unwrap(); // $10.00

        let err = s.checkout(TenderRequest::cash(500)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
    }

    #[test]
    fn test_hotkeys() {
        let mut s = session(SimulatedGateway::instant());

        assert_eq!(HotKey::from_key("F3"), Some(HotKey::ResetCart));
        assert_eq!(HotKey::from_key("F6"), Some(HotKey::OpenPayment));
        assert_eq!(HotKey::from_key("F5"), None);

        // F6 on empty cart is ignored
        assert_eq!(s.apply_hotkey(HotKey::OpenPayment), HotKeyOutcome::Ignored);

        s.scan("cola").unwrap();
        assert_eq!(
            s.apply_hotkey(HotKey::OpenPayment),
            HotKeyOutcome::PaymentOpened
        );

        // F3 resets
        s.set_discount_input("10");
        assert_eq!(s.apply_hotkey(HotKey::ResetCart), HotKeyOutcome::CartReset);
        assert!(s.cart().is_empty());
        assert_eq!(s.cart().discount_bps, 0);
    }

    #[test]
    fn test_add_product_by_id_from_browser() {
        let mut s = session(SimulatedGateway::instant());
        let totals = s.add_product_by_id("p-2").unwrap();
        assert_eq!(totals.subtotal_cents, 249);

        let err = s.add_product_by_id("nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
