//! # Billing Configuration
//!
//! Configuration for the billing session, loaded once at screen mount.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use serde::{Deserialize, Serialize};

/// Billing session configuration.
///
/// ## Fields
/// All fields have sensible defaults for development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingConfig {
    /// Store name (displayed on receipts and invoices)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// How long to wait for the settlement gateway before giving up.
    pub settlement_timeout_ms: u64,

    /// Reason pre-selected when the return modal opens.
    pub default_return_reason: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            store_name: "Bodega".to_string(),
            currency_symbol: "$".to_string(),
            settlement_timeout_ms: 5_000,
            default_return_reason: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BillingConfig::default();
        assert_eq!(config.settlement_timeout_ms, 5_000);
        // No reason is pre-selected: submission must fail until one is chosen
        assert!(config.default_return_reason.is_empty());
    }
}
