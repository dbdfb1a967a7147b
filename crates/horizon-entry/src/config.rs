//! Entry configuration loaded from TOML.
//!
//! ```
//! use horizon_entry::EntryConfig;
//!
//! let config = EntryConfig::from_toml_str(r##"
//! spacing = 4.0
//! caret_color = "#ff0000"
//! font_family = "Sans"
//! "##).unwrap();
//!
//! assert_eq!(config.spacing, 4.0);
//! assert_eq!(config.selection_color, "#009ccf");
//! ```

use std::path::{Path, PathBuf};

use horizon_entry_core::Color;
use horizon_entry_core::logging::targets;
use horizon_entry_style::StyleEngine;
use horizon_entry_style::rules::StylePriority;
use serde::{Deserialize, Serialize};

use crate::error::{EntryError, Result};

/// Settings applied to newly created entries.
///
/// Every field is optional in the TOML file; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Gap between an icon and the text region, in pixels.
    pub spacing: f32,
    /// Caret color used until a stylesheet sets `caret-color`.
    pub caret_color: String,
    /// Selection color used until a stylesheet sets `selection-background-color`.
    pub selection_color: String,
    /// Font family used until a stylesheet sets `font-family`.
    pub font_family: Option<String>,
    /// Font size in pixels used until a stylesheet sets `font-size`.
    pub font_size: Option<f32>,
    /// Stylesheet loaded into the style engine at application priority.
    pub stylesheet: Option<PathBuf>,
}

impl EntryConfig {
    /// Default gap between icon and text.
    pub const DEFAULT_SPACING: f32 = 6.0;
    /// Default caret and selection color.
    pub const DEFAULT_HIGHLIGHT: &'static str = "#009ccf";

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EntryError::config_io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::ENTRY, path = %path.display(), "loaded entry config");
        Ok(config)
    }

    /// Write the configuration as TOML.
    pub fn save_toml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| EntryError::config_io(path, e))
    }

    /// Check that both colors parse.
    pub fn validate(&self) -> Result<()> {
        self.caret_color()?;
        self.selection_color()?;
        Ok(())
    }

    /// The parsed caret color.
    pub fn caret_color(&self) -> Result<Color> {
        parse_color("caret_color", &self.caret_color)
    }

    /// The parsed selection color.
    pub fn selection_color(&self) -> Result<Color> {
        parse_color("selection_color", &self.selection_color)
    }

    /// The font description used before any stylesheet applies.
    ///
    /// `"family Npx"`, `"Npx"` or `"family"`; `None` if neither is set.
    pub fn font_name(&self) -> Option<String> {
        font_name(self.font_family.as_deref(), self.font_size)
    }

    /// Load the configured stylesheet, if any, into `engine`.
    pub fn apply_stylesheet(&self, engine: &StyleEngine) -> Result<()> {
        if let Some(path) = &self.stylesheet {
            engine.load_stylesheet(path, StylePriority::Application)?;
        }
        Ok(())
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            spacing: Self::DEFAULT_SPACING,
            caret_color: Self::DEFAULT_HIGHLIGHT.to_string(),
            selection_color: Self::DEFAULT_HIGHLIGHT.to_string(),
            font_family: None,
            font_size: None,
            stylesheet: None,
        }
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color> {
    Color::from_hex(value).ok_or_else(|| EntryError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

/// Build a font description from an optional family and pixel size.
pub(crate) fn font_name(family: Option<&str>, size: Option<f32>) -> Option<String> {
    match (family, size) {
        (Some(family), Some(size)) => Some(format!("{family} {size}px")),
        (None, Some(size)) => Some(format!("{size}px")),
        (Some(family), None) => Some(family.to_string()),
        (None, None) => None,
    }
}
