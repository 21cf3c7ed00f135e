//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Implementors compare and hash by `id()` alone, so a vendor that gains stock
/// is still the same vendor.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` is the same entity (same identifier).
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
