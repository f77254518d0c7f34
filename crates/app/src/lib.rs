//! Host application: stocks a pantry from a scenario file and checks out
//! its cart.

pub mod report;
pub mod scenario;

use std::sync::Arc;

use chrono::NaiveDate;

use pantry_checkout::CheckoutEngine;
use pantry_inventory::Inventory;

pub use scenario::{ProviderEntry, Scenario, SCENARIO_ENV};

/// Stock a fresh inventory from `scenario`, check out its cart and render
/// the plain-text report (stock before, receipt, stock after).
pub fn run(scenario: &Scenario, today: NaiveDate) -> anyhow::Result<String> {
    let inventory = Arc::new(Inventory::new());
    let providers = scenario.stock(&inventory, today)?;

    let mut out = report::providers(&providers);
    out.push_str(&report::inventory("Inventory before checkout", &inventory.list_available()));

    let engine = CheckoutEngine::new(Arc::clone(&inventory));
    let receipt = engine.checkout_all(&scenario.cart);

    out.push_str(&report::receipt(&receipt));
    out.push_str(&report::inventory("Inventory after checkout", &inventory.list_available()));
    Ok(out)
}
