//! Selector type definitions.

use std::fmt;

/// A complete CSS selector (e.g., "Panel > Entry:focus").
///
/// A selector consists of one or more selector parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Selector parts, left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Create a simple type selector.
    pub fn type_selector(widget_type: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::type_only(widget_type)],
            combinators: vec![],
        }
    }

    /// Create a selector from a single part.
    pub fn from_part(part: SelectorPart) -> Self {
        Self {
            parts: vec![part],
            combinators: vec![],
        }
    }

    /// Add a descendant selector part.
    pub fn descendant(mut self, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(Combinator::Descendant);
        }
        self.parts.push(part);
        self
    }

    /// Add a child selector part.
    pub fn child(mut self, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(Combinator::Child);
        }
        self.parts.push(part);
        self
    }

    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match self.combinators.get(i - 1) {
                    Some(Combinator::Child) => write!(f, " > ")?,
                    _ => write!(f, " ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A single compound selector (e.g., "Entry#search.compact:focus").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (widget type name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id), matched against the object name.
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Pseudo-class selectors (:focus, :indeterminate, ...).
    pub pseudo_classes: Vec<PseudoClass>,
}

impl SelectorPart {
    /// Create a type-only selector.
    pub fn type_only(widget_type: impl Into<String>) -> Self {
        Self {
            type_selector: Some(TypeSelector::Type(widget_type.into())),
            ..Default::default()
        }
    }

    /// Create a universal selector part.
    pub fn universal() -> Self {
        Self {
            type_selector: Some(TypeSelector::Universal),
            ..Default::default()
        }
    }

    /// Add an ID selector.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class selector.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a pseudo-class selector.
    pub fn with_pseudo(mut self, pseudo: PseudoClass) -> Self {
        self.pseudo_classes.push(pseudo);
        self
    }

    /// Whether the part constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.pseudo_classes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(t)) => write!(f, "{}", t)?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, ":{}", pseudo)?;
        }
        Ok(())
    }
}

/// Type selector - matches widget type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Matches any widget (*).
    Universal,
    /// Matches a specific widget type name.
    Type(String),
}

/// How two selector parts relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Any ancestor (whitespace).
    Descendant,
    /// Direct parent (>).
    Child,
}

/// Style-state tags a widget can carry.
///
/// A widget carries at most one pseudo-class at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    Hover,
    Active,
    Focus,
    Indeterminate,
    Disabled,
    Checked,
}

impl PseudoClass {
    /// Parse a pseudo-class name as written after ':' in CSS.
    pub fn from_css(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hover" => Some(Self::Hover),
            "active" | "pressed" => Some(Self::Active),
            "focus" | "focused" => Some(Self::Focus),
            "indeterminate" => Some(Self::Indeterminate),
            "disabled" => Some(Self::Disabled),
            "checked" => Some(Self::Checked),
            _ => None,
        }
    }

    /// The CSS name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Focus => "focus",
            Self::Indeterminate => "indeterminate",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let selector = Selector::type_selector("Panel").child(
            SelectorPart::type_only("Entry")
                .with_id("search")
                .with_pseudo(PseudoClass::Focus),
        );
        assert_eq!(selector.to_string(), "Panel > Entry#search:focus");
    }

    #[test]
    fn pseudo_aliases() {
        assert_eq!(PseudoClass::from_css("focused"), Some(PseudoClass::Focus));
        assert_eq!(PseudoClass::from_css("Indeterminate"), Some(PseudoClass::Indeterminate));
        assert_eq!(PseudoClass::from_css("visited"), None);
    }
}
