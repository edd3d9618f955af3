//! # Cart Ledger
//!
//! The in-memory ordered collection of line items for the sale currently
//! being built, plus its derived pricing.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Operator Action          Operation               Ledger Change         │
//! │  ───────────────          ─────────               ─────────────         │
//! │                                                                         │
//! │  Scan / pick product ───► add_product() ───────► merge or append       │
//! │                                                                         │
//! │  Quantity stepper ──────► set_quantity() ──────► qty ≤ 0 removes line  │
//! │                                                                         │
//! │  Click remove ──────────► remove_line() ───────► line deleted          │
//! │                                                                         │
//! │  F3 / cancel sale ──────► reset() ─────────────► lines + discount = 0  │
//! │                                                                         │
//! │  Discount field ────────► set_discount_bps() ──► reprices totals       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`; insertion order is display order
//! - `line_total == unit_price × quantity` after every mutation
//! - Stored quantity is always ≥ 1 (a quantity of 0 or less removes the line)
//!
//! ## Why Infallible Operations?
//! Quantity fields are numeric steppers and the session layer validates caps
//! before calling in, so the ledger itself never produces errors. Unknown
//! ids on update/remove are no-ops.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart with quantity and computed line total.
///
/// ## Price Freezing
/// Sku, name and unit price are captured when the product is first added.
/// If the catalog price changes afterwards, this line keeps the original.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID this line refers to.
    pub product_id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart. Always ≥ 1 while the line exists.
    pub quantity: i64,

    /// Stored line total. Recomputed on every quantity change so it never
    /// drifts from `unit_price_cents * quantity`.
    pub line_total_cents: i64,
}

impl CartLine {
    /// Creates a new line from a product with quantity 1.
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: 1,
            line_total_cents: product.price_cents,
        }
    }

    /// Sets the quantity and recomputes the stored line total.
    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.line_total_cents = self.unit_price_cents * quantity;
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart ledger: ordered line items plus a discount percentage.
///
/// ## Lifecycle
/// Created empty when the billing screen mounts; cleared on successful
/// settlement, manual reset (F3), or when the screen unmounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order (= display order).
    pub lines: Vec<CartLine>,

    /// Discount percentage in basis points (1000 = 10%).
    /// May exceed 10000, in which case the total goes negative.
    pub discount_bps: u32,
}

impl Cart {
    /// Creates a new empty cart with no discount.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity +1, line total recomputed
    /// - Product not in cart: appended as a new line with quantity 1
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            let qty = line.quantity + 1;
            line.set_quantity(qty);
            return;
        }

        self.lines.push(CartLine::from_product(product));
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0`: removes the line entirely (a stored zero or negative
    ///   quantity never exists)
    /// - Unknown product id: no-op
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.set_quantity(quantity);
        }
    }

    /// Removes a line unconditionally. Unknown product id is a no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empties the ledger and zeroes the discount.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.discount_bps = 0;
    }

    /// Sets the discount percentage in basis points.
    pub fn set_discount_bps(&mut self, bps: u32) {
        self.discount_bps = bps;
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Calculates the subtotal (sum of stored line totals).
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Calculates the discount amount from the subtotal and discount bps.
    pub fn discount_amount(&self) -> Money {
        self.subtotal().percentage(self.discount_bps)
    }

    /// Calculates the final total (subtotal − discount).
    ///
    /// Not floored at zero: a discount above 100% produces a negative total
    /// (open question in the original design, preserved and logged upstream).
    pub fn total(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    /// Derives the full pricing summary.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Pricing summary derived from cart state. Pure function of the ledger and
/// the discount percentage; recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub discount_bps: u32,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let discount = cart.discount_amount();
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: subtotal.cents(),
            discount_bps: cart.discount_bps,
            discount_cents: discount.cents(),
            total_cents: (subtotal - discount).cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("SKU-{}", id), format!("Product {}", id), price_cents)
    }

    #[test]
    fn test_add_product_twice_merges() {
        let mut cart = Cart::new();
        let p = product("1", 500); // $5.00

        cart.add_product(&p);
        cart.add_product(&p);

        assert_eq!(cart.line_count(), 1); // one line, never two
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].line_total_cents, 1000);
    }

    #[test]
    fn test_add_then_set_quantity() {
        // Add $5 product twice, then set quantity to 3:
        // single line, quantity 3, line total $15.00
        let mut cart = Cart::new();
        let p = product("A", 500);

        cart.add_product(&p);
        cart.add_product(&p);
        cart.set_quantity("A", 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
        assert_eq!(cart.lines[0].line_total_cents, 1500);
    }

    #[test]
    fn test_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let p = product("1", 500);
        cart.add_product(&p);

        cart.set_quantity("1", 0);
        assert!(cart.is_empty());

        cart.add_product(&p);
        cart.set_quantity("1", -1);
        assert!(cart.is_empty(), "negative quantity must remove the line");
    }

    #[test]
    fn test_line_never_stores_nonpositive_quantity() {
        let mut cart = Cart::new();
        let p = product("1", 500);
        cart.add_product(&p);
        cart.set_quantity("1", 4);

        for line in &cart.lines {
            assert!(line.quantity >= 1);
            assert_eq!(line.line_total_cents, line.unit_price_cents * line.quantity);
        }
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        let p = product("1", 500);
        cart.add_product(&p);

        cart.set_quantity("nope", 7);
        cart.remove_line("nope");

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 500));
        cart.add_product(&product("2", 300));

        cart.remove_line("1");

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].product_id, "2");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_product(&product("b", 100));
        cart.add_product(&product("a", 200));
        cart.add_product(&product("c", 300));
        cart.add_product(&product("a", 200)); // merge must not reorder

        let ids: Vec<&str> = cart.lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_pricing_scenario() {
        // One item, price $10, qty 2, discount 10%:
        // subtotal $20.00, discount $2.00, total $18.00
        let mut cart = Cart::new();
        let p = product("1", 1000);
        cart.add_product(&p);
        cart.set_quantity("1", 2);
        cart.set_discount_bps(1000);

        let totals = cart.totals();
        assert_eq!(totals.subtotal_cents, 2000);
        assert_eq!(totals.discount_cents, 200);
        assert_eq!(totals.total_cents, 1800);
    }

    #[test]
    fn test_pricing_identity() {
        // total == subtotal - subtotal*discount/100 and
        // subtotal == Σ line_total, with no drift from incremental updates
        let mut cart = Cart::new();
        cart.add_product(&product("1", 333));
        cart.add_product(&product("2", 799));
        cart.set_quantity("1", 7);
        cart.set_quantity("2", 2);
        cart.set_quantity("1", 5);
        cart.set_discount_bps(1250); // 12.5%

        let stored_sum: i64 = cart.lines.iter().map(|l| l.line_total_cents).sum();
        let recomputed: i64 = cart
            .lines
            .iter()
            .map(|l| l.unit_price_cents * l.quantity)
            .sum();
        assert_eq!(stored_sum, recomputed, "stored line totals drifted");

        let totals = cart.totals();
        assert_eq!(totals.subtotal_cents, stored_sum);
        assert_eq!(
            totals.total_cents,
            totals.subtotal_cents - totals.discount_cents
        );
    }

    #[test]
    fn test_discount_over_100_goes_negative() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));
        cart.set_discount_bps(15000); // 150%

        let totals = cart.totals();
        assert_eq!(totals.total_cents, -500);
    }

    #[test]
    fn test_reset_clears_fully() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));
        cart.set_discount_bps(1000);

        cart.reset();

        assert!(cart.is_empty());
        assert_eq!(cart.discount_bps, 0);

        let totals = cart.totals();
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.discount_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }
}
