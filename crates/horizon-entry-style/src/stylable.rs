//! The stylable protocol: named style properties a widget type exposes.
//!
//! A widget type registers each style property it understands once, with a
//! kind and a default. Values are then read by name from the computed style
//! (falling back to the default), and written by name as inline properties.
//!
//! # Example
//!
//! ```
//! use horizon_entry_core::Color;
//! use horizon_entry_style::prelude::*;
//!
//! let mut registry = StylePropertyRegistry::new("Entry");
//! registry
//!     .register(StylePropertySpec::new("caret-color", PropertyKind::Color, Color::BLUE.into()))
//!     .unwrap();
//!
//! assert!(registry.find("caret-color").is_some());
//! assert!(registry.register(StylePropertySpec::new("caret-color", PropertyKind::Color, Color::RED.into())).is_err());
//! ```

use crate::selector::PseudoClass;
use crate::style::ComputedStyle;
use crate::types::{PropertyKind, PropertyValue};
use crate::{Error, Result};

/// Declaration of one named style property.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePropertySpec {
    /// CSS property name.
    pub name: String,
    /// Kind of value the property holds.
    pub kind: PropertyKind,
    /// Value used when no rule sets the property.
    pub default: PropertyValue,
}

impl StylePropertySpec {
    /// Declare a property.
    pub fn new(name: impl Into<String>, kind: PropertyKind, default: PropertyValue) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
        }
    }
}

/// The style properties of one widget type.
#[derive(Debug, Clone)]
pub struct StylePropertyRegistry {
    type_name: &'static str,
    specs: Vec<StylePropertySpec>,
}

impl StylePropertyRegistry {
    /// An empty registry for a widget type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            specs: Vec::new(),
        }
    }

    /// Widget type the registry belongs to.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Register a property. Names are unique per type.
    pub fn register(&mut self, spec: StylePropertySpec) -> Result<()> {
        if self.find(&spec.name).is_some() {
            return Err(Error::DuplicateProperty { name: spec.name });
        }
        if !spec.default.fits(spec.kind) {
            return Err(Error::PropertyType {
                name: spec.name,
                expected: spec.kind,
                got: spec.default.kind(),
            });
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Look up a property by name.
    pub fn find(&self, name: &str) -> Option<&StylePropertySpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Iterate over registered properties in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StylePropertySpec> {
        self.specs.iter()
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// A widget whose look is driven by the style system.
///
/// Methods take `&self`; implementors keep their style state behind
/// interior mutability, the way widgets share the rest of their state.
pub trait Stylable {
    /// Type name matched by type selectors.
    fn style_type_name(&self) -> &'static str;

    /// Current pseudo-class.
    fn pseudo_class(&self) -> Option<PseudoClass>;

    /// Replace the pseudo-class and restyle.
    fn set_pseudo_class(&self, pseudo_class: Option<PseudoClass>);

    /// The style properties this type exposes.
    fn style_properties(&self) -> &StylePropertyRegistry;

    /// Resolve the current style.
    fn computed_style(&self) -> ComputedStyle;

    /// Store a value as an inline property.
    fn set_inline_property(&self, name: &str, value: PropertyValue);

    /// Re-apply the computed style.
    fn style_changed(&self);

    /// Read a registered property from the computed style.
    ///
    /// Falls back to the registered default when no rule sets the property
    /// or a rule sets it to a value of the wrong kind.
    fn style_property(&self, name: &str) -> Result<PropertyValue> {
        let Some(spec) = self.style_properties().find(name) else {
            tracing::warn!(
                target: horizon_entry_core::logging::targets::STYLE,
                type_name = self.style_type_name(),
                property = name,
                "unknown style property"
            );
            return Err(Error::unknown_property(name, self.style_type_name()));
        };

        Ok(self
            .computed_style()
            .get(name)
            .filter(|value| value.fits(spec.kind))
            .unwrap_or_else(|| spec.default.clone()))
    }

    /// Set a registered property inline and restyle.
    fn set_style_property(&self, name: &str, value: PropertyValue) -> Result<()> {
        let Some(spec) = self.style_properties().find(name) else {
            tracing::warn!(
                target: horizon_entry_core::logging::targets::STYLE,
                type_name = self.style_type_name(),
                property = name,
                "unknown style property"
            );
            return Err(Error::unknown_property(name, self.style_type_name()));
        };

        if !value.fits(spec.kind) {
            tracing::warn!(
                target: horizon_entry_core::logging::targets::STYLE,
                type_name = self.style_type_name(),
                property = name,
                expected = ?spec.kind,
                got = ?value.kind(),
                "style property value has the wrong kind"
            );
            return Err(Error::PropertyType {
                name: name.to_string(),
                expected: spec.kind,
                got: value.kind(),
            });
        }

        tracing::debug!(
            target: horizon_entry_core::logging::targets::STYLE,
            type_name = self.style_type_name(),
            property = name,
            ?value,
            "set style property"
        );
        self.set_inline_property(name, value);
        self.style_changed();
        Ok(())
    }
}
