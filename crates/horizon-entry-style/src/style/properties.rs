//! Style properties as declared by a rule or inline style.

use std::collections::BTreeMap;

use horizon_entry_core::Color;

use crate::types::{EdgeValues, LengthValue, PropertyValue, StyleValue};

/// A set of declared style properties.
///
/// Common properties have typed fields. Anything else a stylesheet declares
/// lands in `extra`, keyed by the CSS property name, so widget types can
/// expose their own style properties without changes here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleProperties {
    /// Text color.
    pub color: StyleValue<Color>,
    /// Background color.
    pub background_color: StyleValue<Color>,
    /// Font families (in priority order).
    pub font_family: StyleValue<Vec<String>>,
    /// Font size.
    pub font_size: StyleValue<LengthValue>,
    /// Padding (inner spacing).
    pub padding: StyleValue<EdgeValues>,
    /// Properties without a typed field.
    pub extra: BTreeMap<String, StyleValue<PropertyValue>>,
}

impl StyleProperties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property by name.
    ///
    /// Names with a typed field are routed to it when the value has the
    /// matching shape; everything else is stored in `extra`.
    pub fn set(&mut self, name: &str, value: PropertyValue) {
        match (name, value) {
            ("color", PropertyValue::Color(c)) => self.color = StyleValue::Set(c),
            ("background-color", PropertyValue::Color(c)) => self.background_color = StyleValue::Set(c),
            ("font-family", PropertyValue::FontFamily(f)) => self.font_family = StyleValue::Set(f),
            ("font-family", PropertyValue::Ident(f) | PropertyValue::String(f)) => {
                self.font_family = StyleValue::Set(vec![f])
            }
            ("font-size", PropertyValue::Length(l)) => self.font_size = StyleValue::Set(l),
            ("font-size", PropertyValue::Number(n)) => self.font_size = StyleValue::Set(LengthValue::Px(n)),
            (name, value) => {
                self.extra.insert(name.to_string(), StyleValue::Set(value));
            }
        }
    }

    /// Whether nothing at all is declared.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_routes_typed_names() {
        let mut props = StyleProperties::new();
        assert!(props.is_empty());

        props.set("color", Color::RED.into());
        props.set("font-size", PropertyValue::Number(12.0));
        props.set("caret-color", Color::BLUE.into());

        assert_eq!(props.color, StyleValue::Set(Color::RED));
        assert_eq!(props.font_size, StyleValue::Set(LengthValue::Px(12.0)));
        assert_eq!(
            props.extra.get("caret-color"),
            Some(&StyleValue::Set(PropertyValue::Color(Color::BLUE)))
        );
        assert!(!props.is_empty());
    }
}
