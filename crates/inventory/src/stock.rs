//! Lot storage and the FIFO deduction primitives.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use pantry_core::{DomainError, DomainResult, Entity, ItemCode, Quantity};

use crate::lot::Lot;

type LotQueue = VecDeque<Lot>;

/// In-memory inventory: every item code maps to its lots in receipt order.
///
/// Thread-safe. The outer map lock is only held to find (or create) a code's
/// queue; each queue has its own mutex, so mutations on one code never block
/// another. A code whose queue is empty is indistinguishable from an absent
/// code.
#[derive(Debug, Default)]
pub struct Inventory {
    codes: RwLock<HashMap<ItemCode, Arc<Mutex<LotQueue>>>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lot to the back of its code's queue.
    ///
    /// Exhausted lots are dropped: they must never be presented as available.
    pub fn receive(&self, lot: Lot) {
        if lot.is_exhausted() {
            tracing::debug!(code = %lot.code(), lot_id = %lot.id(), "skipping exhausted lot");
            return;
        }

        let queue = self.queue_or_insert(lot.code());
        let mut lots = queue.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(
            code = %lot.code(),
            lot_id = %lot.id(),
            quantity = %lot.quantity(),
            "lot received"
        );
        lots.push_back(lot);
    }

    /// Run `f` with exclusive access to one code's lots.
    ///
    /// Everything done through the guard is atomic with respect to other
    /// callers touching the same code.
    pub fn with_stock<R>(&self, code: &ItemCode, f: impl FnOnce(&mut StockGuard<'_>) -> R) -> R {
        match self.queue(code) {
            Some(queue) => {
                let mut lots = queue.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut StockGuard { code, lots: &mut *lots })
            }
            None => {
                let mut empty = LotQueue::new();
                f(&mut StockGuard { code, lots: &mut empty })
            }
        }
    }

    /// Sum of every lot's quantity for `code`; zero when the code is unknown.
    pub fn total_quantity(&self, code: &ItemCode) -> Quantity {
        self.with_stock(code, |stock| stock.total_quantity())
    }

    /// Take `amount` out of `code`'s stock, oldest lot first.
    pub fn reduce_quantity(&self, code: &ItemCode, amount: Quantity) -> DomainResult<()> {
        self.with_stock(code, |stock| stock.reduce_quantity(amount))
    }

    /// Remove every lot of `code`, returning them oldest first.
    pub fn remove_all(&self, code: &ItemCode) -> Vec<Lot> {
        self.with_stock(code, |stock| stock.remove_all())
    }

    /// Snapshot of `code`'s lots in consumption order.
    pub fn lots(&self, code: &ItemCode) -> Vec<Lot> {
        self.with_stock(code, |stock| stock.lots().cloned().collect())
    }

    /// Snapshot of all available stock, codes sorted, lots in FIFO order.
    ///
    /// The returned lots are copies; mutating them does not touch the inventory.
    pub fn list_available(&self) -> BTreeMap<ItemCode, Vec<Lot>> {
        let codes = self.codes.read().unwrap_or_else(PoisonError::into_inner);
        codes
            .iter()
            .filter_map(|(code, queue)| {
                let lots = queue.lock().unwrap_or_else(PoisonError::into_inner);
                if lots.is_empty() {
                    None
                } else {
                    Some((code.clone(), lots.iter().cloned().collect::<Vec<_>>()))
                }
            })
            .collect()
    }

    /// Codes with at least one lot, sorted.
    pub fn codes(&self) -> Vec<ItemCode> {
        self.list_available().into_keys().collect()
    }

    pub fn is_empty(&self) -> bool {
        let codes = self.codes.read().unwrap_or_else(PoisonError::into_inner);
        codes
            .values()
            .all(|queue| queue.lock().unwrap_or_else(PoisonError::into_inner).is_empty())
    }

    fn queue(&self, code: &ItemCode) -> Option<Arc<Mutex<LotQueue>>> {
        let codes = self.codes.read().unwrap_or_else(PoisonError::into_inner);
        codes.get(code).cloned()
    }

    fn queue_or_insert(&self, code: &ItemCode) -> Arc<Mutex<LotQueue>> {
        if let Some(queue) = self.queue(code) {
            return queue;
        }
        let mut codes = self.codes.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(codes.entry(code.clone()).or_default())
    }
}

/// Exclusive view of one code's lots, handed out by [`Inventory::with_stock`].
#[derive(Debug)]
pub struct StockGuard<'a> {
    code: &'a ItemCode,
    lots: &'a mut LotQueue,
}

impl StockGuard<'_> {
    pub fn code(&self) -> &ItemCode {
        self.code
    }

    pub fn total_quantity(&self) -> Quantity {
        self.lots.iter().map(Lot::quantity).sum()
    }

    pub fn lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter()
    }

    /// Consume `amount` across lots, oldest first.
    ///
    /// A lot larger than the remainder is shrunk; a lot equal to or smaller
    /// than the remainder is removed and the rest carries to the next lot.
    /// Fails without touching any lot if all lots together hold less than
    /// `amount`.
    pub fn reduce_quantity(&mut self, amount: Quantity) -> DomainResult<()> {
        let available = self.total_quantity();
        if amount > available {
            return Err(DomainError::insufficient_stock(self.code, amount, available));
        }

        let mut remaining = amount;
        while !remaining.is_zero() {
            let Some(oldest) = self.lots.front_mut() else {
                break;
            };
            let held = oldest.quantity();
            match held.cmp(&remaining) {
                Ordering::Greater => {
                    oldest.set_quantity(held.saturating_sub(remaining));
                    tracing::debug!(
                        code = %self.code,
                        lot_id = %oldest.id(),
                        taken = %remaining,
                        left = %oldest.quantity(),
                        "lot reduced"
                    );
                    remaining = Quantity::ZERO;
                }
                Ordering::Equal | Ordering::Less => {
                    if let Some(lot) = self.lots.pop_front() {
                        tracing::debug!(
                            code = %self.code,
                            lot_id = %lot.id(),
                            taken = %held,
                            "lot consumed"
                        );
                    }
                    remaining = remaining.saturating_sub(held);
                }
            }
        }
        Ok(())
    }

    /// Remove every lot, returning them oldest first.
    pub fn remove_all(&mut self) -> Vec<Lot> {
        let removed: Vec<Lot> = self.lots.drain(..).collect();
        if !removed.is_empty() {
            tracing::debug!(code = %self.code, lots = removed.len(), "all lots removed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::UnitKind;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn code(s: &str) -> ItemCode {
        ItemCode::new(s).unwrap()
    }

    fn qty(n: u32) -> Quantity {
        Quantity::from(n)
    }

    fn test_lot(c: &str, quantity: Quantity) -> Lot {
        let received = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let expires = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        Lot::new(code(c), quantity, UnitKind::Count, received, expires).unwrap()
    }

    fn quantities(inventory: &Inventory, c: &str) -> Vec<Quantity> {
        inventory.lots(&code(c)).iter().map(Lot::quantity).collect()
    }

    #[test]
    fn total_quantity_is_zero_for_unknown_code() {
        let inventory = Inventory::new();
        assert_eq!(inventory.total_quantity(&code("CARROT")), Quantity::ZERO);
        assert!(inventory.is_empty());
    }

    #[test]
    fn total_quantity_sums_all_lots_of_a_code() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("BANANA", qty(4)));
        inventory.receive(test_lot("BANANA", qty(6)));
        inventory.receive(test_lot("APPLE", qty(9)));

        assert_eq!(inventory.total_quantity(&code("BANANA")), qty(10));
        assert_eq!(inventory.total_quantity(&code("APPLE")), qty(9));
    }

    #[test]
    fn exhausted_lots_are_never_stored() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("APPLE", Quantity::ZERO));
        assert!(inventory.is_empty());
        assert!(inventory.list_available().is_empty());
    }

    #[test]
    fn reduce_shrinks_oldest_lot_when_it_covers_the_amount() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("APPLE", qty(10)));

        inventory.reduce_quantity(&code("APPLE"), qty(4)).unwrap();
        assert_eq!(quantities(&inventory, "APPLE"), vec![qty(6)]);
    }

    #[test]
    fn reduce_removes_lot_that_matches_exactly() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("APPLE", qty(4)));
        inventory.receive(test_lot("APPLE", qty(6)));

        inventory.reduce_quantity(&code("APPLE"), qty(4)).unwrap();
        assert_eq!(quantities(&inventory, "APPLE"), vec![qty(6)]);
    }

    #[test]
    fn reduce_spans_lot_boundaries_in_fifo_order() {
        let inventory = Inventory::new();
        let older = test_lot("BANANA", qty(4));
        let newer = test_lot("BANANA", qty(6));
        let newer_id = *newer.id();
        inventory.receive(older);
        inventory.receive(newer);

        inventory.reduce_quantity(&code("BANANA"), qty(7)).unwrap();

        let lots = inventory.lots(&code("BANANA"));
        assert_eq!(lots.len(), 1);
        assert_eq!(*lots[0].id(), newer_id);
        assert_eq!(lots[0].quantity(), qty(3));
    }

    #[test]
    fn reduce_to_exactly_zero_across_lots_leaves_no_lot_behind() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("BANANA", qty(4)));
        inventory.receive(test_lot("BANANA", qty(6)));

        inventory.reduce_quantity(&code("BANANA"), qty(10)).unwrap();
        assert!(inventory.lots(&code("BANANA")).is_empty());
        assert!(!inventory.list_available().contains_key(&code("BANANA")));
    }

    #[test]
    fn reduce_handles_fractional_weights() {
        let inventory = Inventory::new();
        let half = Quantity::new(Decimal::new(5, 1)).unwrap();
        let two_and_a_half = Quantity::new(Decimal::new(25, 1)).unwrap();
        inventory.receive(test_lot("4011", half));
        inventory.receive(test_lot("4011", two_and_a_half));

        inventory
            .reduce_quantity(&code("4011"), Quantity::new(Decimal::new(7, 1)).unwrap())
            .unwrap();
        assert_eq!(
            quantities(&inventory, "4011"),
            vec![Quantity::new(Decimal::new(23, 1)).unwrap()]
        );
    }

    #[test]
    fn reduce_beyond_stock_fails_without_mutation() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("APPLE", qty(2)));
        inventory.receive(test_lot("APPLE", qty(3)));

        let err = inventory.reduce_quantity(&code("APPLE"), qty(6)).unwrap_err();
        match err {
            DomainError::InsufficientStock {
                code: c,
                requested,
                available,
            } => {
                assert_eq!(c, code("APPLE"));
                assert_eq!(requested, qty(6));
                assert_eq!(available, qty(5));
            }
            other => panic!("Expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(quantities(&inventory, "APPLE"), vec![qty(2), qty(3)]);
    }

    #[test]
    fn reduce_unknown_code_fails_unless_amount_is_zero() {
        let inventory = Inventory::new();
        assert!(inventory.reduce_quantity(&code("CARROT"), Quantity::ZERO).is_ok());
        assert!(inventory.reduce_quantity(&code("CARROT"), qty(1)).is_err());
    }

    #[test]
    fn remove_all_returns_lots_oldest_first() {
        let inventory = Inventory::new();
        let first = test_lot("APPLE", qty(1));
        let second = test_lot("APPLE", qty(2));
        let ids = vec![*first.id(), *second.id()];
        inventory.receive(first);
        inventory.receive(second);

        let removed = inventory.remove_all(&code("APPLE"));
        let removed_ids: Vec<_> = removed.iter().map(|l| *l.id()).collect();
        assert_eq!(removed_ids, ids);
        assert_eq!(inventory.total_quantity(&code("APPLE")), Quantity::ZERO);
        assert!(inventory.remove_all(&code("APPLE")).is_empty());
    }

    #[test]
    fn list_available_is_a_detached_snapshot() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("APPLE", qty(5)));

        let mut snapshot = inventory.list_available();
        snapshot.clear();

        assert_eq!(inventory.total_quantity(&code("APPLE")), qty(5));
        assert_eq!(inventory.codes(), vec![code("APPLE")]);
    }

    #[test]
    fn guard_makes_query_and_reduction_atomic() {
        let inventory = Inventory::new();
        inventory.receive(test_lot("APPLE", qty(5)));

        let taken = inventory.with_stock(&code("APPLE"), |stock| {
            let available = stock.total_quantity();
            stock.reduce_quantity(available).map(|()| available)
        });
        assert_eq!(taken.unwrap(), qty(5));
        assert!(inventory.is_empty());
    }

    #[test]
    fn concurrent_reductions_never_oversell() {
        let inventory = Inventory::new();
        for _ in 0..10 {
            inventory.receive(test_lot("RICE", qty(10)));
        }

        let successes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..20)
                            .filter(|_| inventory.reduce_quantity(&code("RICE"), qty(1)).is_ok())
                            .count()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .sum::<usize>()
        });

        assert_eq!(successes, 100);
        assert_eq!(inventory.total_quantity(&code("RICE")), Quantity::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: total is the sum of lots, and a reduction within stock
        /// lowers it by exactly the amount without leaving empty lots.
        #[test]
        fn reduce_within_stock_is_exact(
            lots in prop::collection::vec(1u32..50, 1..8),
            take_percent in 0u32..=100,
        ) {
            let inventory = Inventory::new();
            for q in &lots {
                inventory.receive(test_lot("BEANS", qty(*q)));
            }
            let before = inventory.total_quantity(&code("BEANS"));
            prop_assert_eq!(before, qty(lots.iter().sum()));

            let amount = qty(lots.iter().sum::<u32>() * take_percent / 100);
            inventory.reduce_quantity(&code("BEANS"), amount).unwrap();

            let after = inventory.total_quantity(&code("BEANS"));
            prop_assert_eq!(Some(after), before.checked_sub(amount));
            for lot in inventory.lots(&code("BEANS")) {
                prop_assert!(!lot.is_exhausted());
            }
        }

        /// Property: asking for more than the stock fails and changes nothing.
        #[test]
        fn reduce_beyond_stock_is_rejected(
            lots in prop::collection::vec(1u32..50, 0..5),
            excess in 1u32..10,
        ) {
            let inventory = Inventory::new();
            for q in &lots {
                inventory.receive(test_lot("BEANS", qty(*q)));
            }
            let before = quantities(&inventory, "BEANS");
            let amount = qty(lots.iter().sum::<u32>() + excess);

            let is_insufficient = matches!(
                inventory.reduce_quantity(&code("BEANS"), amount),
                Err(DomainError::InsufficientStock { .. })
            );
            prop_assert!(is_insufficient);
            prop_assert_eq!(quantities(&inventory, "BEANS"), before);
        }
    }
}
