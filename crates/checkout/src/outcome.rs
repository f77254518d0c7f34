use chrono::{DateTime, Utc};
use serde::Serialize;

use pantry_core::{CheckoutId, ItemCode, Quantity};

/// How one cart line was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Nothing of the code is in stock; inventory untouched.
    NotAvailable,
    /// Less than requested was in stock: the customer gets `given` and the
    /// code's stock is cleared.
    PartiallyFulfilled { given: Quantity },
    /// Stock matched the request exactly and is now cleared.
    ExactlyFulfilled,
    /// Stock covered the request with some left over.
    Fulfilled,
}

impl CheckoutOutcome {
    /// Quantity handed to the customer for a line that requested `requested`.
    pub fn given(self, requested: Quantity) -> Quantity {
        match self {
            CheckoutOutcome::NotAvailable => Quantity::ZERO,
            CheckoutOutcome::PartiallyFulfilled { given } => given,
            CheckoutOutcome::ExactlyFulfilled | CheckoutOutcome::Fulfilled => requested,
        }
    }

    /// Customer-facing text for a line that requested `requested`.
    pub fn message(self, requested: Quantity) -> &'static str {
        if requested.is_zero() {
            return "Nothing requested";
        }
        match self {
            CheckoutOutcome::NotAvailable => "Sorry, item is not available",
            CheckoutOutcome::PartiallyFulfilled { .. } => {
                "Providing amount available (not total requested)"
            }
            CheckoutOutcome::ExactlyFulfilled => "We have just the right amount!",
            CheckoutOutcome::Fulfilled => "Removing from inventory",
        }
    }
}

/// One settled cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    pub code: ItemCode,
    pub requested: Quantity,
    pub outcome: CheckoutOutcome,
}

impl CheckoutLine {
    pub fn given(&self) -> Quantity {
        self.outcome.given(self.requested)
    }

    pub fn message(&self) -> &'static str {
        self.outcome.message(self.requested)
    }
}

/// Result of checking out a whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    id: CheckoutId,
    checked_out_at: DateTime<Utc>,
    lines: Vec<CheckoutLine>,
}

impl CheckoutReceipt {
    pub(crate) fn new(id: CheckoutId, checked_out_at: DateTime<Utc>, lines: Vec<CheckoutLine>) -> Self {
        Self {
            id,
            checked_out_at,
            lines,
        }
    }

    pub fn id(&self) -> CheckoutId {
        self.id
    }

    pub fn checked_out_at(&self) -> DateTime<Utc> {
        self.checked_out_at
    }

    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    pub fn outcome(&self, code: &ItemCode) -> Option<CheckoutOutcome> {
        self.lines
            .iter()
            .find(|line| &line.code == code)
            .map(|line| line.outcome)
    }
}
