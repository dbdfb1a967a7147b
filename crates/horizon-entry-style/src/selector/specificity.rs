//! CSS specificity calculation.

use super::{Selector, SelectorPart, TypeSelector};

/// CSS specificity as (a, b, c) tuple.
///
/// - a: ID selectors
/// - b: Class selectors and pseudo-classes
/// - c: Type selectors
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Calculate specificity of a selector.
    pub fn of_selector(selector: &Selector) -> Self {
        selector
            .parts
            .iter()
            .map(Self::of_part)
            .fold(Self::ZERO, |acc, s| Self(acc.0 + s.0, acc.1 + s.1, acc.2 + s.2))
    }

    /// Calculate specificity of a selector part.
    pub fn of_part(part: &SelectorPart) -> Self {
        let a = u32::from(part.id.is_some());
        let b = (part.classes.len() + part.pseudo_classes.len()) as u32;
        let c = u32::from(matches!(part.type_selector, Some(TypeSelector::Type(_))));
        Self(a, b, c)
    }

    /// Combine with source order for complete ordering.
    pub fn with_order(self, order: u32) -> SpecificityWithOrder {
        SpecificityWithOrder {
            specificity: self,
            order,
        }
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// Specificity combined with source order for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecificityWithOrder {
    /// The CSS specificity value.
    pub specificity: Specificity,
    /// Source order for tie-breaking (higher = later).
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::PseudoClass;

    #[test]
    fn specificity_calculation() {
        let selector = Selector::type_selector("Panel").descendant(
            SelectorPart::type_only("Entry")
                .with_id("search")
                .with_class("compact")
                .with_pseudo(PseudoClass::Focus),
        );
        assert_eq!(Specificity::of_selector(&selector), Specificity(1, 2, 2));
        assert_eq!(Specificity::of_part(&SelectorPart::universal()), Specificity::ZERO);
    }

    #[test]
    fn order_breaks_ties() {
        let early = Specificity(0, 1, 1).with_order(1);
        let late = Specificity(0, 1, 1).with_order(2);
        let heavier = Specificity(0, 2, 0).with_order(0);
        assert!(early < late);
        assert!(late < heavier);
    }
}
