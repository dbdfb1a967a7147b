//! Stylesheet collection and management.

use std::path::{Path, PathBuf};

use crate::rules::StyleRule;
use crate::selector::Selector;
use crate::style::StyleProperties;
use crate::{Error, Result};

/// Priority level for style sources.
///
/// Higher priority styles override lower priority ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StylePriority {
    /// Built-in defaults (lowest priority).
    Theme = 0,
    /// Application-level stylesheet.
    Application = 1,
    /// Widget-specific styles.
    Widget = 2,
    /// Inline styles (highest priority).
    Inline = 3,
}

impl StylePriority {
    /// Get a numeric value for ordering calculations.
    pub fn as_order_offset(&self) -> u32 {
        (*self as u32) << 24
    }
}

/// A stylesheet containing multiple rules.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// The rules in this stylesheet.
    pub rules: Vec<StyleRule>,
    /// Priority level.
    pub priority: StylePriority,
    /// Source file path, if loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new(priority: StylePriority) -> Self {
        Self {
            rules: vec![],
            priority,
            source_path: None,
        }
    }

    /// Create an application stylesheet.
    pub fn application() -> Self {
        Self::new(StylePriority::Application)
    }

    /// Load a stylesheet from a CSS file.
    pub fn from_file(path: impl AsRef<Path>, priority: StylePriority) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut sheet = Self::from_css(&content, priority)?;
        sheet.source_path = Some(path.to_path_buf());
        tracing::debug!(
            target: horizon_entry_core::logging::targets::STYLE,
            path = %path.display(),
            rules = sheet.len(),
            "loaded stylesheet"
        );
        Ok(sheet)
    }

    /// Parse a stylesheet from CSS text.
    pub fn from_css(css: &str, priority: StylePriority) -> Result<Self> {
        let rules = crate::parser::parse_css(css)?;
        Ok(Self {
            rules,
            priority,
            source_path: None,
        })
    }

    /// Add a rule to the stylesheet.
    ///
    /// The rule's order is set from the current number of rules.
    pub fn add_rule(&mut self, selector: Selector, properties: StyleProperties) {
        let order = self.rules.len() as u32;
        self.rules.push(StyleRule::new(selector, properties, order));
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::application()
    }
}
