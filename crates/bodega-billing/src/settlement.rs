//! # Settlement
//!
//! The asynchronous payment settlement boundary.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Settlement Boundary                                 │
//! │                                                                         │
//! │  BillingSession::checkout()                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SettlementRequest { lines, subtotal, discount, total,                 │
//! │                      method, staff_id?, customer_id? }                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tokio::time::timeout( gateway.settle(request) )                       │
//! │       │                                                                 │
//! │       ├── Ok(receipt)  ──► invoice appended, cart cleared              │
//! │       ├── Rejected     ──► cart kept, error surfaced                   │
//! │       └── Timeout      ──► cart kept, error surfaced                   │
//! │                                                                         │
//! │  The simulated gateway never fails on its own, but the failure branch  │
//! │  exists because real payment/credit backends do fail and callers need  │
//! │  a defined path.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use bodega_core::cart::CartLine;
use bodega_core::types::PaymentMethod;

// =============================================================================
// Settlement Request / Receipt
// =============================================================================

/// Everything the settlement collaborator needs to finalize a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    /// Cart lines at checkout time (frozen snapshots).
    pub lines: Vec<CartLine>,

    /// Subtotal before discount, in cents.
    pub subtotal_cents: i64,

    /// Discount amount, in cents.
    pub discount_cents: i64,

    /// Final total, in cents.
    pub total_cents: i64,

    /// How the sale is tendered.
    pub method: PaymentMethod,

    /// Staff member whose credit balance is debited (staff_credit only).
    pub staff_id: Option<String>,

    /// Customer whose credit balance is debited (customer_credit only).
    pub customer_id: Option<String>,
}

/// Proof of settlement returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReceipt {
    /// External reference (auth code, transaction id).
    pub reference: String,

    /// When the gateway settled the payment.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub settled_at: DateTime<Utc>,
}

// =============================================================================
// Settlement Error
// =============================================================================

/// Backend failures at the settlement boundary.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Clone, Error)]
pub enum SettlementError {
    /// Gateway did not answer within the configured window.
    #[error("Settlement timed out after {secs} seconds")]
    Timeout { secs: u64 },

    /// Gateway answered but declined the payment.
    #[error("Settlement rejected: {reason}")]
    Rejected { reason: String },

    /// Gateway could not be reached at all.
    #[error("Settlement backend unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Settlement Gateway Trait
// =============================================================================

/// The settlement collaborator: accepts a completed cart and settles it.
///
/// Implementations are expected to be genuinely asynchronous; the session
/// wraps calls in `tokio::time::timeout`, so a slow gateway surfaces as
/// [`SettlementError::Timeout`] rather than hanging the screen.
pub trait SettlementGateway {
    /// Settles the payment for a completed cart.
    fn settle(
        &self,
        request: &SettlementRequest,
    ) -> impl std::future::Future<Output = Result<SettlementReceipt, SettlementError>> + Send;
}

// =============================================================================
// Simulated Gateway
// =============================================================================

/// How the simulated gateway answers.
#[derive(Debug, Clone)]
enum GatewayMode {
    /// Approve after the configured delay (production-sim default).
    Approve,
    /// Decline after the configured delay (for exercising the failure branch).
    Reject(String),
}

/// Fixed-delay gateway standing in for a real payment backend.
///
/// Always approves unless explicitly configured to reject; combined with the
/// session's timeout this covers all three outcomes of the boundary.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    mode: GatewayMode,
}

impl SimulatedGateway {
    /// Approving gateway with the given settlement delay.
    pub fn with_delay(delay: Duration) -> Self {
        SimulatedGateway {
            delay,
            mode: GatewayMode::Approve,
        }
    }

    /// Approving gateway with no delay. Useful in tests and the demo.
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Gateway that declines every payment with the given reason.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        SimulatedGateway {
            delay: Duration::ZERO,
            mode: GatewayMode::Reject(reason.into()),
        }
    }
}

impl SettlementGateway for SimulatedGateway {
    async fn settle(
        &self,
        request: &SettlementRequest,
    ) -> Result<SettlementReceipt, SettlementError> {
        debug!(
            total = request.total_cents,
            method = ?request.method,
            "Simulated settlement started"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.mode {
            GatewayMode::Approve => Ok(SettlementReceipt {
                reference: Uuid::new_v4().to_string(),
                settled_at: Utc::now(),
            }),
            GatewayMode::Reject(reason) => Err(SettlementError::Rejected {
                reason: reason.clone(),
            }),
        }
    }
}

// =============================================================================
// Credit Book
// =============================================================================

/// Outstanding credit balances for staff and customers.
///
/// Read-only from billing's perspective: the balance check happens before
/// submission, and the actual debit belongs to the (future) settlement
/// backend, not this process.
#[derive(Debug, Clone, Default)]
pub struct CreditBook {
    staff: HashMap<String, i64>,
    customers: HashMap<String, i64>,
}

impl CreditBook {
    /// Creates an empty credit book.
    pub fn new() -> Self {
        CreditBook::default()
    }

    /// Registers a staff balance (builder style, for fixtures/tests).
    pub fn with_staff(mut self, staff_id: impl Into<String>, balance_cents: i64) -> Self {
        self.staff.insert(staff_id.into(), balance_cents);
        self
    }

    /// Registers a customer balance (builder style, for fixtures/tests).
    pub fn with_customer(mut self, customer_id: impl Into<String>, balance_cents: i64) -> Self {
        self.customers.insert(customer_id.into(), balance_cents);
        self
    }

    /// Outstanding balance for a staff member, if known.
    pub fn staff_balance(&self, staff_id: &str) -> Option<i64> {
        self.staff.get(staff_id).copied()
    }

    /// Outstanding balance for a customer, if known.
    pub fn customer_balance(&self, customer_id: &str) -> Option<i64> {
        self.customers.get(customer_id).copied()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request(total_cents: i64) -> SettlementRequest {
        SettlementRequest {
            lines: vec![],
            subtotal_cents: total_cents,
            discount_cents: 0,
            total_cents,
            method: PaymentMethod::Cash,
            staff_id: None,
            customer_id: None,
        }
    }

    #[tokio::test]
    async fn test_instant_gateway_approves() {
        let gateway = SimulatedGateway::instant();
        let receipt = gateway.settle(&request(1000)).await.unwrap();
        assert!(!receipt.reference.is_empty());
    }

    #[tokio::test]
    async fn test_rejecting_gateway() {
        let gateway = SimulatedGateway::rejecting("card declined");
        let err = gateway.settle(&request(1000)).await.unwrap_err();
        assert!(matches!(err, SettlementError::Rejected { .. }));
        assert_eq!(err.to_string(), "Settlement rejected: card declined");
    }

    #[tokio::test]
    async fn test_delayed_gateway_still_approves() {
        let gateway = SimulatedGateway::with_delay(Duration::from_millis(10));
        assert!(gateway.settle(&request(1000)).await.is_ok());
    }

    #[test]
    fn test_credit_book_balances() {
        let book = CreditBook::new()
            .with_staff("s-1", 5000)
            .with_customer("c-1", 2500);

        assert_eq!(book.staff_balance("s-1"), Some(5000));
        assert_eq!(book.customer_balance("c-1"), Some(2500));
        assert_eq!(book.customer_balance("c-2"), None);
    }
}
