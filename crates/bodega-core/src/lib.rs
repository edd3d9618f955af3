//! # bodega-core: Pure Business Logic for Bodega POS
//!
//! This crate is the **heart** of the billing workflow. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bodega POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (client-rendered)                   │   │
//! │  │    Search UI ──► Cart UI ──► Tender UI ──► Return Modal        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bodega-billing                               │   │
//! │  │    BillingSession, SettlementGateway, InvoiceStore, Returns    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bodega-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  returns  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ Selection │  │   │
//! │  │   │  Invoice  │  │ Discount  │  │ CartLine  │  │   clamp   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, PaymentMethod, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart ledger and its derived pricing
//! - [`lookup`] - Barcode/text query classification and matching
//! - [`returns`] - Return selection math (clamping, refund totals)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bodega_core::cart::Cart;
//! use bodega_core::types::Product;
//!
//! let coffee = Product::new("p-1", "CAF-001", "House Coffee", 1000); // $10.00
//!
//! let mut cart = Cart::new();
//! cart.add_product(&coffee);
//! cart.add_product(&coffee); // merges: one line, quantity 2
//! cart.set_discount_bps(1000); // 10%
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal_cents, 2000); // $20.00
//! assert_eq!(totals.discount_cents, 200);  // $2.00
//! assert_eq!(totals.total_cents, 1800);    // $18.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod lookup;
pub mod money;
pub mod returns;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::Money` instead of
// `use bodega_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use returns::ReturnSelection;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-tenant in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Minimum length for a scanner input to be treated as a barcode.
///
/// Inputs of 10+ characters that are all digits go through the barcode
/// index before any text matching happens.
pub const MIN_BARCODE_DIGITS: usize = 10;
