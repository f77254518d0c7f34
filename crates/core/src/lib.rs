//! `pantry-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory,
//! provider and checkout crates (no IO, no locking, no logging).

pub mod code;
pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;
pub mod value_object;

pub use code::ItemCode;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CheckoutId, LotId, ProviderId};
pub use quantity::Quantity;
pub use value_object::ValueObject;
