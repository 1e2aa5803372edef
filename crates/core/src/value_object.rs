//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: a SKU or a price is defined entirely by
//! its attribute values, whereas a product is an entity identified by its id.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Sku(String);
///
/// impl ValueObject for Sku {}
///
/// assert_eq!(Sku("MS-RED".into()), Sku("MS-RED".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
