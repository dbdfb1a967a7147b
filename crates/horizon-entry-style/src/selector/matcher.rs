//! Selector matching algorithm.

use super::{Combinator, PseudoClass, Selector, SelectorPart, TypeSelector};

/// What a selector part is matched against: one node of the widget tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleNode<'a> {
    /// Widget type name (e.g., "Entry").
    pub type_name: &'a str,
    /// Object name (for #id selectors).
    pub name: Option<&'a str>,
    /// Style classes.
    pub classes: &'a [String],
    /// Current pseudo-class, if any.
    pub pseudo_class: Option<PseudoClass>,
}

impl<'a> StyleNode<'a> {
    /// A node with just a type name.
    pub fn of_type(type_name: &'a str) -> Self {
        Self {
            type_name,
            ..Default::default()
        }
    }
}

/// Selector matching engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check a full selector against a node and its ancestors (nearest first).
    ///
    /// Walks the selector from right to left. Descendant combinators search
    /// upward greedily, which is sufficient since parts only test local state.
    pub fn matches(selector: &Selector, node: &StyleNode<'_>, ancestors: &[StyleNode<'_>]) -> bool {
        let Some((subject, rest)) = selector.parts.split_last() else {
            return false;
        };
        if !Self::part_matches(subject, node) {
            return false;
        }

        let mut next_ancestor = 0;
        for (part, combinator) in rest.iter().zip(&selector.combinators).rev() {
            match combinator {
                Combinator::Child => match ancestors.get(next_ancestor) {
                    Some(parent) if Self::part_matches(part, parent) => next_ancestor += 1,
                    _ => return false,
                },
                Combinator::Descendant => {
                    let found = ancestors[next_ancestor.min(ancestors.len())..]
                        .iter()
                        .position(|ancestor| Self::part_matches(part, ancestor));
                    match found {
                        Some(offset) => next_ancestor += offset + 1,
                        None => return false,
                    }
                }
            }
        }
        true
    }

    /// Check if a selector part matches a single node.
    pub fn part_matches(part: &SelectorPart, node: &StyleNode<'_>) -> bool {
        if let Some(TypeSelector::Type(name)) = &part.type_selector
            && name != node.type_name
        {
            return false;
        }

        if let Some(id) = &part.id
            && node.name != Some(id.as_str())
        {
            return false;
        }

        if !part
            .classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
        {
            return false;
        }

        part.pseudo_classes
            .iter()
            .all(|pseudo| node.pseudo_class == Some(*pseudo))
    }
}
