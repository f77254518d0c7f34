//! Plain-text rendering of providers, stock and receipts.

use std::collections::BTreeMap;
use std::fmt::Write;

use pantry_checkout::CheckoutReceipt;
use pantry_core::ItemCode;
use pantry_inventory::Lot;
use pantry_providers::ProviderInfo;

pub fn providers(providers: &[ProviderInfo]) -> String {
    let mut out = String::from("Providers\n");
    for info in providers {
        let _ = writeln!(out, "  {} ({}) [{}]", info.name, info.kind.as_str(), info.id);
    }
    out.push('\n');
    out
}

pub fn inventory(title: &str, stock: &BTreeMap<ItemCode, Vec<Lot>>) -> String {
    let mut out = format!("{title}\n");
    if stock.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (code, lots) in stock {
        for lot in lots {
            let _ = writeln!(
                out,
                "  {:<8} {:<20} {} {:>8} {:<5} received {} expires {}",
                code.as_str(),
                lot.name(),
                lot.unit_kind().label(),
                lot.quantity().to_string(),
                lot.unit_kind().unit(),
                lot.received_on(),
                lot.expires_on(),
            );
        }
    }
    out.push('\n');
    out
}

pub fn receipt(receipt: &CheckoutReceipt) -> String {
    let mut out = format!(
        "Checkout Id -[{}]\nDate of Checkout -[{}]\n",
        receipt.id(),
        receipt.checked_out_at().format("%Y/%m/%d %H:%M:%S")
    );
    for line in receipt.lines() {
        let _ = writeln!(
            out,
            "  {:<8} requested {:>8} given {:>8}  {}",
            line.code.as_str(),
            line.requested.to_string(),
            line.given().to_string(),
            line.message(),
        );
    }
    out.push('\n');
    out
}
