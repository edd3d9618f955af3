//! # Validation Module
//!
//! Input validation utilities for Bodega POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Numeric steppers, basic format checks                             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Billing session (Rust)                                       │
//! │  └── THIS MODULE: Business rule validation before ledger mutation      │
//! │                                                                         │
//! │  Defense in depth: the cart ledger itself stays infallible because     │
//! │  the session validates everything on the way in.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (an empty scan is simply a miss)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a return reason.
///
/// ## Rules
/// - Must not be empty after trimming (submission without a reason is
///   rejected with a user-facing message)
/// - Maximum 200 characters
pub fn validate_return_reason(reason: &str) -> ValidationResult<String> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "return reason".to_string(),
        });
    }

    if reason.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "return reason".to_string(),
            max: 200,
        });
    }

    Ok(reason.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0) — zero/negative goes through removal, not here
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates cart size (number of unique lines).
///
/// ## Rules
/// - Must not exceed MAX_CART_LINES (100)
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

/// Validates a credit payment amount against an outstanding balance.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed the balance
///
/// ## User Workflow
/// ```text
/// Customer credit tender: $18.00, balance $25.00
///      │
///      ▼
/// validate_credit_amount(1800, 2500) ← THIS FUNCTION
///      │
///      ├── amount ≤ 0?       → "payment amount must be positive"
///      ├── amount > balance? → out of range, enforced BEFORE submission
///      └── OK → proceed to settlement
/// ```
pub fn validate_credit_amount(amount_cents: i64, balance_cents: i64) -> ValidationResult<()> {
    if amount_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    if amount_cents > balance_cents {
        return Err(ValidationError::OutOfRange {
            field: "payment amount".to_string(),
            min: 1,
            max: balance_cents,
        });
    }

    Ok(())
}

// =============================================================================
// Discount Parsing
// =============================================================================

/// Parses a free-form discount percentage entry into basis points.
///
/// The discount field is free text: anything non-numeric or negative
/// defaults to 0 rather than erroring. Values above 100% are accepted
/// as entered, in which case the cart total goes negative.
///
/// ## Example
/// ```rust
/// use bodega_core::validation::parse_discount_percent;
///
/// assert_eq!(parse_discount_percent("10"), 1000);
/// assert_eq!(parse_discount_percent("12.5"), 1250);
/// assert_eq!(parse_discount_percent("abc"), 0);
/// assert_eq!(parse_discount_percent(""), 0);
/// assert_eq!(parse_discount_percent("-5"), 0);
/// assert_eq!(parse_discount_percent("150"), 15000);
/// ```
pub fn parse_discount_percent(input: &str) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() && pct >= 0.0 => (pct * 100.0).round() as u32,
        _ => 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  cola ").unwrap(), "cola");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_return_reason() {
        assert_eq!(validate_return_reason(" damaged ").unwrap(), "damaged");
        assert!(validate_return_reason("").is_err());
        assert!(validate_return_reason("   ").is_err());
        assert!(validate_return_reason(&"r".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
    }

    #[test]
    fn test_validate_credit_amount() {
        assert!(validate_credit_amount(1800, 2500).is_ok());
        assert!(validate_credit_amount(2500, 2500).is_ok());

        assert!(validate_credit_amount(0, 2500).is_err());
        assert!(validate_credit_amount(-100, 2500).is_err());
        assert!(validate_credit_amount(2501, 2500).is_err());
    }

    #[test]
    fn test_parse_discount_percent() {
        assert_eq!(parse_discount_percent("10"), 1000);
        assert_eq!(parse_discount_percent(" 12.5 "), 1250);
        assert_eq!(parse_discount_percent("0"), 0);

        // Invalid entries default to 0, never an error
        assert_eq!(parse_discount_percent(""), 0);
        assert_eq!(parse_discount_percent("abc"), 0);
        assert_eq!(parse_discount_percent("-5"), 0);
        assert_eq!(parse_discount_percent("NaN"), 0);

        // Over 100% is accepted as entered
        assert_eq!(parse_discount_percent("150"), 15000);
    }
}
