//! Checkout: deducts a cart from the inventory, line by line.
//!
//! Every cart line is settled on its own under its code's lock and yields a
//! [`CheckoutOutcome`]; nothing is reserved across lines and no line can abort
//! the others.

pub mod cart;
pub mod engine;
pub mod outcome;

pub use cart::Cart;
pub use engine::CheckoutEngine;
pub use outcome::{CheckoutLine, CheckoutOutcome, CheckoutReceipt};
