//! # bodega-billing: Billing Workflows for Bodega POS
//!
//! The stateful layer between the client-rendered screens and the pure logic
//! in `bodega-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bodega POS Data Flow                               │
//! │                                                                         │
//! │  Billing screen (scan field, cart table, tender modal, return modal)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bodega-billing (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌────────────────┐  │   │
//! │  │   │ BillingSession│   │ ReturnProcessor│   │  Collaborators │  │   │
//! │  │   │ (session.rs)  │   │ (returns.rs)   │   │                │  │   │
//! │  │   │               │   │                │   │ Catalog        │  │   │
//! │  │   │ Idle→Settling │   │ Search→Loaded→ │   │ InvoiceStore   │  │   │
//! │  │   │ →Idle         │   │ Submit→Closed  │   │ Gateway        │  │   │
//! │  │   └───────────────┘   └────────────────┘   │ CreditBook     │  │   │
//! │  │                                            └────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bodega-core (pure cart/pricing/return math)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`session`] - The billing session: scan, cart edits, checkout
//! - [`settlement`] - Settlement gateway trait, simulated gateway, credit book
//! - [`invoices`] - Invoice history append log and filtering
//! - [`returns`] - Return processor workflow
//! - [`catalog`] - Catalog and barcode-index collaborators
//! - [`config`] - Billing configuration
//! - [`fixtures`] - Development fixture data
//! - [`error`] - The serialized error surface for the frontend
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bodega_billing::config::BillingConfig;
//! use bodega_billing::fixtures;
//! use bodega_billing::session::{BillingSession, TenderRequest};
//! use bodega_billing::settlement::SimulatedGateway;
//!
//! # async fn run() -> Result<(), bodega_billing::BillingError> {
//! let mut session = BillingSession::new(
//!     Box::new(fixtures::fixture_catalog()),
//!     Box::new(fixtures::fixture_invoice_store()),
//!     SimulatedGateway::instant(),
//!     fixtures::fixture_credit_book(),
//!     BillingConfig::default(),
//! );
//!
//! session.scan("8900000000017")?;
//! session.set_discount_input("10");
//! let invoice = session.checkout(TenderRequest::cash(2000)).await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod invoices;
pub mod returns;
pub mod session;
pub mod settlement;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{Catalog, InMemoryCatalog};
pub use config::BillingConfig;
pub use error::{BillingError, ErrorCode};
pub use invoices::{HistoryFilter, InMemoryInvoiceStore, InvoiceStore};
pub use returns::{ReturnPhase, ReturnProcessor, ReturnReceipt};
pub use session::{BillingSession, CheckoutPhase, HotKey, HotKeyOutcome, ScanOutcome, TenderRequest};
pub use settlement::{
    CreditBook, SettlementError, SettlementGateway, SettlementReceipt, SettlementRequest,
    SimulatedGateway,
};
