//! Scripted walkthrough of the billing and return workflows against the
//! fixture data. Run with:
//!
//! ```bash
//! RUST_LOG=debug cargo run -p bodega-billing --bin demo
//! ```

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bodega_billing::config::BillingConfig;
use bodega_billing::fixtures;
use bodega_billing::invoices::HistoryFilter;
use bodega_billing::session::{BillingSession, HotKey, TenderRequest};
use bodega_billing::settlement::SimulatedGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut session = BillingSession::new(
        Box::new(fixtures::fixture_catalog()),
        Box::new(fixtures::fixture_invoice_store()),
        SimulatedGateway::with_delay(Duration::from_millis(150)),
        fixtures::fixture_credit_book(),
        BillingConfig::default(),
    );

    // Scan a barcode, then a text query, then bump a quantity.
    session.scan("8900000000017")?; // Cola, via the barcode index
    session.scan("bread")?; // Sourdough Loaf, first text match
    session.set_quantity("prod-001", 3)?;
    session.set_discount_input("10");

    let totals = session.totals();
    info!(
        subtotal = totals.subtotal_cents,
        discount = totals.discount_cents,
        total = totals.total_cents,
        "Cart ready"
    );

    // F6 opens the tender modal, then settle in cash.
    session.apply_hotkey(HotKey::OpenPayment);
    let invoice = session.checkout(TenderRequest::cash(2000)).await?;
    info!(
        number = %invoice.number,
        total = invoice.total_cents,
        change = ?invoice.change_cents,
        "Sale complete"
    );

    // The new invoice shows up first in the history.
    let history = session.history(&HistoryFilter::all());
    info!(count = history.len(), newest = %history[0].number, "Invoice history");

    // Return two items from a past sale, looked up by its receipt number.
    let mut ret = session.begin_return();
    ret.load("INV-20260818-0042", session.invoice_store())?;
    ret.select_item("li-0042-1");
    ret.set_return_quantity("li-0042-1", 5); // clamps to the original quantity
    ret.set_reason("damaged in transit");
    let receipt = ret.submit()?;
    info!(
        return_id = %receipt.return_id,
        refund = receipt.refund_cents,
        "Return submitted"
    );

    Ok(())
}
