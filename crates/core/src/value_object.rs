//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared entirely by their attribute
/// values: two `Requirement`s for the same product and quantity are the same
/// requirement, while two orders with equal fields are still distinct
/// entities. To "modify" a value object, build a new one.
///
/// The supertraits keep value objects cheap to copy, comparable, and
/// debuggable:
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Requirement { product_id: ProductId, quantity: i64 }
///
/// impl ValueObject for Requirement {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
