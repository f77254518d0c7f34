//! Inventory domain module.
//!
//! Lots of the same item code are queued in receipt order and consumed
//! first-in, first-out. All state is in memory; the [`Inventory`] is an
//! explicit, thread-safe instance handed to whoever runs checkout.

pub mod lot;
pub mod stock;

pub use lot::{Lot, UnitKind};
pub use stock::{Inventory, StockGuard};
