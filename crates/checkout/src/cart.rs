use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pantry_core::{ItemCode, Quantity};

/// Requested quantities keyed by item code.
///
/// Quantities are never negative (enforced by [`Quantity`]); zero is allowed
/// and settles as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ItemCode, Quantity>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `quantity` of `code`, on top of anything already requested.
    pub fn add(&mut self, code: ItemCode, quantity: Quantity) -> &mut Self {
        *self.lines.entry(code).or_default() += quantity;
        self
    }

    pub fn requested(&self, code: &ItemCode) -> Option<Quantity> {
        self.lines.get(code).copied()
    }

    /// Lines in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemCode, Quantity)> {
        self.lines.iter().map(|(code, quantity)| (code, *quantity))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<(ItemCode, Quantity)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ItemCode, Quantity)>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for (code, quantity) in iter {
            cart.add(code, quantity);
        }
        cart
    }
}
