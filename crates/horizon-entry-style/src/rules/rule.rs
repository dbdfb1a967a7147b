//! Single style rule definition.

use crate::selector::{Selector, Specificity, SpecificityWithOrder};
use crate::style::StyleProperties;

/// A style rule mapping a selector to properties.
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// The selector for matching widgets.
    pub selector: Selector,
    /// The style properties to apply.
    pub properties: StyleProperties,
    /// Pre-computed specificity.
    pub specificity: Specificity,
    /// Source order (for tie-breaking when specificity is equal).
    pub order: u32,
}

impl StyleRule {
    /// Create a new style rule.
    pub fn new(selector: Selector, properties: StyleProperties, order: u32) -> Self {
        let specificity = Specificity::of_selector(&selector);
        Self {
            selector,
            properties,
            specificity,
            order,
        }
    }

    /// Create a rule with a type selector.
    pub fn for_type(widget_type: impl Into<String>, properties: StyleProperties, order: u32) -> Self {
        Self::new(Selector::type_selector(widget_type), properties, order)
    }

    /// Get the specificity with source order for comparison.
    pub fn specificity_with_order(&self) -> SpecificityWithOrder {
        self.specificity.with_order(self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{PseudoClass, SelectorPart};

    #[test]
    fn pseudo_rule_outranks_type_rule() {
        let plain = StyleRule::for_type("Entry", StyleProperties::default(), 5);
        let focused = StyleRule::new(
            Selector::from_part(SelectorPart::type_only("Entry").with_pseudo(PseudoClass::Focus)),
            StyleProperties::default(),
            0,
        );

        assert_eq!(plain.specificity, Specificity(0, 0, 1));
        assert!(focused.specificity_with_order() > plain.specificity_with_order());
    }
}
