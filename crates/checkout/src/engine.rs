use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use pantry_core::{CheckoutId, ItemCode, Quantity};
use pantry_inventory::{Inventory, StockGuard};

use crate::cart::Cart;
use crate::outcome::{CheckoutLine, CheckoutOutcome, CheckoutReceipt};

/// Settles carts against a shared [`Inventory`].
///
/// The engine owns nothing but a handle to the inventory; every mutation goes
/// through the inventory's per-code lock.
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    inventory: Arc<Inventory>,
}

impl CheckoutEngine {
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Self { inventory }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Check out every line of `cart`, stamped with the current time.
    pub fn checkout_all(&self, cart: &Cart) -> CheckoutReceipt {
        self.checkout_all_at(cart, Utc::now())
    }

    /// Check out every line of `cart`.
    ///
    /// Lines are independent: each one is attempted regardless of how the
    /// others were settled.
    pub fn checkout_all_at(&self, cart: &Cart, checked_out_at: DateTime<Utc>) -> CheckoutReceipt {
        let id = CheckoutId::new();
        let lines: Vec<CheckoutLine> = cart
            .iter()
            .map(|(code, requested)| CheckoutLine {
                code: code.clone(),
                requested,
                outcome: self.checkout_line(code, requested),
            })
            .collect();

        tracing::info!(
            checkout_id = %id,
            lines = lines.len(),
            "checkout completed"
        );
        CheckoutReceipt::new(id, checked_out_at, lines)
    }

    /// Settle a single line under `code`'s lock.
    pub fn checkout_line(&self, code: &ItemCode, requested: Quantity) -> CheckoutOutcome {
        let outcome = self
            .inventory
            .with_stock(code, |stock| settle(stock, requested));

        match outcome {
            CheckoutOutcome::NotAvailable | CheckoutOutcome::PartiallyFulfilled { .. } => {
                tracing::warn!(%code, %requested, ?outcome, "{}", outcome.message(requested));
            }
            CheckoutOutcome::ExactlyFulfilled | CheckoutOutcome::Fulfilled => {
                tracing::info!(%code, %requested, ?outcome, "{}", outcome.message(requested));
            }
        }
        outcome
    }
}

fn settle(stock: &mut StockGuard<'_>, requested: Quantity) -> CheckoutOutcome {
    // Nothing asked for: already satisfied, leave stock alone.
    if requested.is_zero() {
        return CheckoutOutcome::Fulfilled;
    }

    let available = stock.total_quantity();
    if available.is_zero() {
        return CheckoutOutcome::NotAvailable;
    }

    match available.cmp(&requested) {
        Ordering::Less => {
            // The whole remaining stock of the code is cleared.
            stock.remove_all();
            CheckoutOutcome::PartiallyFulfilled { given: available }
        }
        Ordering::Equal => {
            stock.remove_all();
            CheckoutOutcome::ExactlyFulfilled
        }
        Ordering::Greater => {
            if let Err(err) = stock.reduce_quantity(requested) {
                tracing::error!(code = %stock.code(), %err, "reduction failed after availability check");
                unreachable!("available {available} exceeds requested {requested} under the same lock: {err}");
            }
            CheckoutOutcome::Fulfilled
        }
    }
}
