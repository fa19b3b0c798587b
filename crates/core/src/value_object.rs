//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity. Two values with the same attributes are
/// the same value; `RoleSet` and `Credential` are the typical examples here.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Salt(String);
///
/// impl ValueObject for Salt {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
