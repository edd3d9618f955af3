//! # Billing Error Type
//!
//! Unified error type crossing the boundary to the frontend.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bodega POS                             │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  checkout(tender)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session operation                                               │  │
//! │  │  Result<T, BillingError>                                         │  │
//! │  │         │                                                        │  │
//! │  │  Empty cart? ──── CoreError::EmptyCart ──────────┐              │  │
//! │  │  Credit bounds? ─ ValidationError ───────────────┤              │  │
//! │  │  Gateway down? ── SettlementError::Timeout ──────┼─► BillingErr │  │
//! │  │  Success ────────────────────────────────────────┘              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) { e.code = "SETTLEMENT_FAILED"; toast(e.message) }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is a recoverable, user-correctable condition surfaced
//! as a transient notification — except the settlement codes, which are the
//! explicit backend-failure branch a real payment backend requires.

use serde::Serialize;

use bodega_core::CoreError;

use crate::settlement::SettlementError;

/// Error returned from billing workflow operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "return reason is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for billing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (invoice, product)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation rejected (empty cart, caps)
    CartError,

    /// Credit payment bounds violated
    PaymentError,

    /// Settlement backend failed or timed out
    SettlementFailed,

    /// A settlement is already in flight (single-flight guard)
    SettlementInProgress,

    /// Workflow called in the wrong phase
    InvalidPhase,
}

impl BillingError {
    /// Creates a new billing error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        BillingError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        BillingError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        BillingError::new(ErrorCode::CartError, message)
    }

    /// Creates a wrong-phase error.
    pub fn invalid_phase(message: impl Into<String>) -> Self {
        BillingError::new(ErrorCode::InvalidPhase, message)
    }
}

/// Converts core errors to billing errors.
impl From<CoreError> for BillingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => BillingError::not_found("Product", &id),
            CoreError::InvoiceNotFound(id) => BillingError::not_found("Invoice", &id),
            CoreError::EmptyCart => BillingError::cart("Cart is empty"),
            CoreError::CartTooLarge { max } => BillingError::cart(format!(
                "Cart cannot have more than {} lines",
                max
            )),
            CoreError::QuantityTooLarge { requested, max } => BillingError::validation(format!(
                "Quantity {} exceeds maximum allowed ({})",
                requested, max
            )),
            CoreError::InvalidPaymentAmount { reason } => BillingError::new(
                ErrorCode::PaymentError,
                format!("Invalid payment amount: {}", reason),
            ),
            CoreError::Validation(e) => BillingError::validation(e.to_string()),
        }
    }
}

/// Converts settlement failures to billing errors.
impl From<SettlementError> for BillingError {
    fn from(err: SettlementError) -> Self {
        match &err {
            SettlementError::Timeout { .. } => {
                tracing::error!(error = %err, "Settlement timed out");
            }
            SettlementError::Rejected { .. } => {
                tracing::warn!(error = %err, "Settlement rejected");
            }
            SettlementError::Unavailable(_) => {
                tracing::error!(error = %err, "Settlement backend unavailable");
            }
        }
        BillingError::new(ErrorCode::SettlementFailed, err.to_string())
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for BillingError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: BillingError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Cart is empty");
    }

    #[test]
    fn test_settlement_error_mapping() {
        let err: BillingError = SettlementError::Timeout { secs: 5 }.into();
        assert_eq!(err.code, ErrorCode::SettlementFailed);
        assert!(err.message.contains("5"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = BillingError::validation("return reason is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "return reason is required");
    }
}
