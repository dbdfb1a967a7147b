//! CSS-like styling system for Horizon Entry.
//!
//! This crate provides:
//!
//! - **CSS Parsing**: Stylesheets parsed with `cssparser`, with per-rule error recovery
//! - **Selectors**: Type, id, class and pseudo-class selectors with descendant/child combinators
//! - **Cascading**: Priority, specificity and source order
//! - **Style Resolution**: [`StyleEngine`] implements the [`StyleResolver`] seam widgets consume
//! - **Stylable Protocol**: Named style property registration plus get/set by name
//!
//! # Example
//!
//! ```
//! use horizon_entry_style::prelude::*;
//!
//! let sheet = StyleSheet::from_css(
//!     "Entry:focus { caret-color: #ff0000; font-size: 14px; }",
//!     StylePriority::Application,
//! ).unwrap();
//!
//! let engine = StyleEngine::new();
//! engine.add_stylesheet(sheet);
//! assert_eq!(engine.rule_count(), 1);
//! ```

pub mod parser;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod stylable;
pub mod style;
pub mod types;

mod error;

pub use error::{Error, Result};
pub use resolve::{StyleContext, StyleEngine, StyleResolver};
pub use stylable::{Stylable, StylePropertyRegistry, StylePropertySpec};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::resolve::{StyleContext, StyleEngine, StyleResolver};
    pub use crate::rules::{StylePriority, StyleRule, StyleSheet};
    pub use crate::selector::{Combinator, PseudoClass, Selector, SelectorPart, Specificity};
    pub use crate::stylable::{Stylable, StylePropertyRegistry, StylePropertySpec};
    pub use crate::style::{ComputedStyle, StyleProperties};
    pub use crate::types::{
        EdgeValues, LengthValue, PropertyKind, PropertyValue, ResolvedEdges, StyleValue,
    };
}

static_assertions::assert_impl_all!(StyleEngine: Send, Sync);
