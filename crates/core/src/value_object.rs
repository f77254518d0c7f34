//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. `ItemCode` and `Quantity` are the value objects of this
//! domain: two lots of `"APPLE"` share a code, and `5` apples equal `5` apples.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new value (e.g. `Quantity::checked_sub` returns a fresh quantity).
///
/// ```ignore
/// let a = Quantity::from(5u32);
/// let b = Quantity::from(5u32);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
