//! Property cascading logic.

use crate::style::StyleProperties;

/// Cascade source properties onto target.
///
/// Every property `source` specifies, keywords included, replaces the one in
/// `target`. `Initial` counts as not specified.
pub fn cascade_properties(target: &mut StyleProperties, source: &StyleProperties) {
    macro_rules! cascade_if_specified {
        ($($prop:ident),+ $(,)?) => {
            $(
                if source.$prop.is_specified() {
                    target.$prop = source.$prop.clone();
                }
            )+
        };
    }

    cascade_if_specified!(color, background_color, font_family, font_size, padding);

    for (name, value) in &source.extra {
        if value.is_specified() {
            target.extra.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyValue, StyleValue};
    use horizon_entry_core::Color;

    #[test]
    fn later_source_wins() {
        let mut target = StyleProperties::new();
        target.set("color", Color::RED.into());
        target.set("caret-color", Color::RED.into());

        let mut source = StyleProperties::new();
        source.set("caret-color", Color::BLUE.into());
        source.font_size = StyleValue::Inherit;

        cascade_properties(&mut target, &source);

        assert_eq!(target.color, StyleValue::Set(Color::RED));
        assert_eq!(target.font_size, StyleValue::Inherit);
        assert_eq!(
            target.extra.get("caret-color"),
            Some(&StyleValue::Set(PropertyValue::Color(Color::BLUE)))
        );
    }
}
