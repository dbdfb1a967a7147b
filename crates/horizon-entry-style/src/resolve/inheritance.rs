//! Property inheritance and resolution to computed values.

use crate::style::{ComputedStyle, StyleProperties};
use crate::types::{EdgeValues, LengthValue, StyleValue};

/// Resolve cascaded properties to a [`ComputedStyle`].
///
/// Inheritance is explicit opt-in: only `inherit` and `unset` take the
/// parent's value. Relative lengths resolve against the computed font size,
/// or the parent's (then the root's) when this style sets none.
pub fn resolve_properties(
    props: &StyleProperties,
    parent: Option<&ComputedStyle>,
    root_font_size: f32,
) -> ComputedStyle {
    let parent_font_size = parent.and_then(|p| p.font_size).unwrap_or(root_font_size);

    let font_size = resolve_font_size(&props.font_size, parent, parent_font_size, root_font_size);
    let em_base = font_size.unwrap_or(parent_font_size);

    let padding = match &props.padding {
        StyleValue::Set(edges) => edges.to_px(em_base, root_font_size),
        StyleValue::Inherit | StyleValue::Unset => parent.map(|p| p.padding).unwrap_or_default(),
        StyleValue::Initial => EdgeValues::zero().to_px(em_base, root_font_size),
    };

    let extra = props
        .extra
        .iter()
        .filter_map(|(name, value)| {
            let inherited = parent.and_then(|p| p.extra.get(name));
            value.resolve_opt(inherited).map(|v| (name.clone(), v))
        })
        .collect();

    ComputedStyle {
        color: props.color.resolve_opt(parent.and_then(|p| p.color.as_ref())),
        background_color: props
            .background_color
            .resolve_opt(parent.and_then(|p| p.background_color.as_ref())),
        font_family: props
            .font_family
            .resolve_opt(parent.and_then(|p| p.font_family.as_ref())),
        font_size,
        padding,
        extra,
    }
}

fn resolve_font_size(
    value: &StyleValue<LengthValue>,
    parent: Option<&ComputedStyle>,
    parent_size: f32,
    root_size: f32,
) -> Option<f32> {
    match value {
        StyleValue::Set(length) => Some(length.to_px(parent_size, root_size)),
        StyleValue::Inherit | StyleValue::Unset => parent.and_then(|p| p.font_size),
        StyleValue::Initial => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyValue, ResolvedEdges};
    use horizon_entry_core::Color;

    #[test]
    fn unspecified_stays_none() {
        let computed = resolve_properties(&StyleProperties::new(), None, 16.0);
        assert_eq!(computed, ComputedStyle::default());
    }

    #[test]
    fn em_lengths_use_own_font_size() {
        let mut props = StyleProperties::new();
        props.font_size = StyleValue::Set(LengthValue::em(2.0));
        props.padding = StyleValue::Set(EdgeValues::uniform(LengthValue::em(0.5)));

        let parent = ComputedStyle {
            font_size: Some(10.0),
            ..Default::default()
        };
        let computed = resolve_properties(&props, Some(&parent), 16.0);

        assert_eq!(computed.font_size, Some(20.0));
        assert_eq!(computed.padding, ResolvedEdges::uniform(10.0));
    }

    #[test]
    fn inherit_is_explicit() {
        let mut parent = ComputedStyle {
            color: Some(Color::RED),
            ..Default::default()
        };
        parent.extra.insert("caret-color".into(), PropertyValue::Color(Color::BLUE));

        let mut props = StyleProperties::new();
        props.extra.insert("caret-color".into(), StyleValue::Inherit);

        let computed = resolve_properties(&props, Some(&parent), 16.0);
        assert_eq!(computed.color, None);
        assert_eq!(computed.extra_color("caret-color"), Some(Color::BLUE));
    }
}
