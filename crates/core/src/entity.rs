//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A lot keeps its identity while its quantity shrinks during checkout; a
/// provider keeps its identity while it accumulates donations.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
