//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Two
/// production runs of 2 mm x 100 cm x 200 cm blue film describe the same
/// variant even though they are different records.
///
/// Implementors that are used as grouping keys must also make sure that
/// values which are equal in the domain are equal in Rust, which usually
/// means normalizing on construction rather than comparing raw inputs.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
