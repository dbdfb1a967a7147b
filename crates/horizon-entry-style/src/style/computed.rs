//! Computed style with all values resolved.

use std::collections::BTreeMap;

use horizon_entry_core::Color;

use crate::types::{PropertyValue, ResolvedEdges};

/// Fully resolved style with concrete values.
///
/// Lengths are in pixels and keywords are resolved. `None` means no rule
/// specified the property, so the widget keeps its own default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    /// Text color.
    pub color: Option<Color>,
    /// Background color.
    pub background_color: Option<Color>,
    /// Font family stack.
    pub font_family: Option<Vec<String>>,
    /// Font size in pixels.
    pub font_size: Option<f32>,
    /// Padding in pixels.
    pub padding: ResolvedEdges,
    /// Resolved values of properties without a typed field.
    pub extra: BTreeMap<String, PropertyValue>,
}

impl ComputedStyle {
    /// Look up a resolved value by CSS property name.
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "color" => self.color.map(PropertyValue::Color),
            "background-color" => self.background_color.map(PropertyValue::Color),
            "font-family" => self.font_family.clone().map(PropertyValue::FontFamily),
            "font-size" => self.font_size.map(PropertyValue::Number),
            "padding" => Some(PropertyValue::Edges(self.padding)),
            _ => self.extra.get(name).cloned(),
        }
    }

    /// Resolved color of an extra property, if it holds one.
    pub fn extra_color(&self, name: &str) -> Option<Color> {
        self.extra.get(name).and_then(PropertyValue::as_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_name() {
        let mut style = ComputedStyle {
            color: Some(Color::RED),
            font_size: Some(13.0),
            ..Default::default()
        };
        style.extra.insert("caret-color".into(), Color::BLUE.into());

        assert_eq!(style.get("color"), Some(PropertyValue::Color(Color::RED)));
        assert_eq!(style.get("font-size"), Some(PropertyValue::Number(13.0)));
        assert_eq!(style.get("font-family"), None);
        assert_eq!(style.extra_color("caret-color"), Some(Color::BLUE));
        assert_eq!(style.get("selection-background-color"), None);
    }
}
