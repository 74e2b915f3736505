//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances with the same attributes are
/// the same value (`Money`, `Currency`, a sale line). They are immutable; to
/// "change" one, build a new one.
///
/// ```ignore
/// let a = Money::from_major(24);
/// let b = Money::from_minor(2_400);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
