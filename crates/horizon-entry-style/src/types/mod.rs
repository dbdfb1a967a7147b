//! Value types for style properties.

mod value;

pub use value::{EdgeValues, LengthValue, PropertyKind, PropertyValue, ResolvedEdges, StyleValue};
