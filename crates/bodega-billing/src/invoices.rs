//! # Invoice History
//!
//! The invoice history append log and its filtering.
//!
//! ## History Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice History                                     │
//! │                                                                         │
//! │  1. APPEND (payment finalizer)                                         │
//! │     └── checkout() settles ──► append(invoice, lines)                  │
//! │         The history is a genuine append log fed by completed sales,    │
//! │         not an unrelated fixture list.                                 │
//! │                                                                         │
//! │  2. BROWSE                                                             │
//! │     └── search(HistoryFilter { query, from, to }) → newest first       │
//! │                                                                         │
//! │  3. RETURN                                                             │
//! │     └── lines(invoice_id) → frozen rows for the return processor       │
//! │                                                                         │
//! │  Invoices are IMMUTABLE once appended.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bodega_core::types::{Invoice, InvoiceLine};

// =============================================================================
// History Filter
// =============================================================================

/// Filter for browsing the invoice history.
///
/// All criteria are optional and combined with AND:
/// - `query`: case-insensitive substring match on the invoice number
/// - `from` / `to`: inclusive date bounds on the invoice date (UTC)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    pub query: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl HistoryFilter {
    /// Matches everything.
    pub fn all() -> Self {
        HistoryFilter::default()
    }

    /// Filter by invoice-number substring.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Filter by inclusive date range.
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Checks whether an invoice passes this filter.
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(query) = &self.query {
            let query = query.trim().to_lowercase();
            if !query.is_empty() && !invoice.number.to_lowercase().contains(&query) {
                return false;
            }
        }

        let date = invoice.date.date_naive();
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// Invoice Store Trait
// =============================================================================

/// Invoice store collaborator: accepts completed sales and serves history.
///
/// The in-memory implementation below stands in for an eventual backend;
/// the billing session and return processor only see this trait.
pub trait InvoiceStore {
    /// Appends an issued invoice with its frozen line items.
    fn append(&mut self, invoice: Invoice, lines: Vec<InvoiceLine>);

    /// Gets an invoice by its unique entity id.
    fn get(&self, id: &str) -> Option<Invoice>;

    /// Resolves a human-readable invoice number, newest match first.
    /// Numbers are display labels and can collide; the newest sale wins.
    fn find_by_number(&self, number: &str) -> Option<Invoice>;

    /// Gets the frozen line items of an invoice by entity id.
    fn lines(&self, id: &str) -> Option<Vec<InvoiceLine>>;

    /// Browses the history, newest first.
    fn search(&self, filter: &HistoryFilter) -> Vec<Invoice>;
}

// =============================================================================
// In-Memory Invoice Store
// =============================================================================

/// Append-log invoice store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvoiceStore {
    entries: Vec<(Invoice, Vec<InvoiceLine>)>,
}

impl InMemoryInvoiceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryInvoiceStore::default()
    }

    /// Number of invoices in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn append(&mut self, invoice: Invoice, lines: Vec<InvoiceLine>) {
        debug!(
            invoice_id = %invoice.id,
            number = %invoice.number,
            total = %invoice.total(),
            "Appending invoice"
        );
        self.entries.push((invoice, lines));
    }

    fn get(&self, id: &str) -> Option<Invoice> {
        self.entries
            .iter()
            .find(|(inv, _)| inv.id == id)
            .map(|(inv, _)| inv.clone())
    }

    fn find_by_number(&self, number: &str) -> Option<Invoice> {
        self.entries
            .iter()
            .rev()
            .find(|(inv, _)| inv.number == number)
            .map(|(inv, _)| inv.clone())
    }

    fn lines(&self, id: &str) -> Option<Vec<InvoiceLine>> {
        self.entries
            .iter()
            .find(|(inv, _)| inv.id == id)
            .map(|(_, lines)| lines.clone())
    }

    fn search(&self, filter: &HistoryFilter) -> Vec<Invoice> {
        // Newest first: the log appends in chronological order
        self.entries
            .iter()
            .rev()
            .filter(|(inv, _)| filter.matches(inv))
            .map(|(inv, _)| inv.clone())
            .collect()
    }
}

// =============================================================================
// Invoice Numbers
// =============================================================================

/// Generates a human-readable invoice number in format: `INV-YYYYMMDD-NNNN`
///
/// ## Format
/// - YYYYMMDD: issue date
/// - NNNN: low digits of the millisecond timestamp
///
/// This is a display label only. Two sales whose timestamps differ by a
/// multiple of ten seconds produce the same number, so the store keys on
/// `Invoice::id` (UUID) and never on this.
///
/// ## Example
/// `INV-20260825-0421`
pub fn generate_invoice_number(at: DateTime<Utc>) -> String {
    let seq = (at.timestamp_millis() % 10000) as u32;
    format!("INV-{}-{:04}", at.format("%Y%m%d"), seq)
}

// =============================================================================
// Unit Tests
// =============================================================================
