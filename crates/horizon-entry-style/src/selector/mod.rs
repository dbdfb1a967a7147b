//! CSS selectors: types, specificity and matching.

mod matcher;
mod specificity;
mod types;

pub use matcher::{SelectorMatcher, StyleNode};
pub use specificity::{Specificity, SpecificityWithOrder};
pub use types::{Combinator, PseudoClass, Selector, SelectorPart, TypeSelector};
