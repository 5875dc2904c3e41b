//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values
/// are the same value. They are immutable; "changing" one means building a new
/// one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Money { cents: u64 }
///
/// impl ValueObject for Money {}
///
/// assert_eq!(Money { cents: 250 }, Money { cents: 250 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
