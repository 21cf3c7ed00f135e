//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`Price { cents: 75, symbol: '$' }` equals
///   any other 75-cent dollar price)
/// - **Entity**: has identity (two items named "Peach" priced `$0.75` are still
///   two different goods)
///
/// Value objects are immutable. To "change" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Weight { grams: u64 }
///
/// impl ValueObject for Weight {}
///
/// assert_eq!(Weight { grams: 500 }, Weight { grams: 500 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
