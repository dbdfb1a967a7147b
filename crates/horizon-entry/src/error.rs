//! Error types for the entry widget crate.

use std::path::PathBuf;

use horizon_entry_core::ObjectError;

/// Result type alias for entry operations.
pub type Result<T> = std::result::Result<T, EntryError>;

/// Errors surfaced by entry configuration and property access.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Reading or writing a configuration file failed.
    #[error("Failed to access config file '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for [`EntryConfig`](crate::EntryConfig).
    #[error("Invalid entry config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Serialising a configuration failed.
    #[error("Failed to serialise entry config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A color string in the configuration is not a hex color.
    #[error("Invalid color '{value}' for '{field}'")]
    InvalidColor { field: &'static str, value: String },

    /// Property access by a name the entry does not have.
    #[error("Entry has no property '{0}'")]
    UnknownProperty(String),

    /// The style system rejected an operation.
    #[error(transparent)]
    Style(#[from] horizon_entry_style::Error),

    /// The object registry rejected an operation.
    #[error("Object registry error: {0}")]
    Object(#[from] ObjectError),
}

impl EntryError {
    /// Create a config I/O error.
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}
