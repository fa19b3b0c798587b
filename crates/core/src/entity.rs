//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity may be unassigned until the persistence layer hands one out, so
/// the id is whatever the implementor says it is (often an `Option`).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether the entity has been given a persistent identity yet.
    fn is_persisted(&self) -> bool;
}
