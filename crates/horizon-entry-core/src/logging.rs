//! Tracing targets used across Horizon Entry.
//!
//! The crates never install a subscriber; applications do. Filter on these
//! targets to see a single subsystem:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_entry::entry=debug,horizon_entry_core::signal=trace")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_entry_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_entry_core::signal";
    /// Object model target.
    pub const OBJECT: &str = "horizon_entry_core::object";
    /// Deferred task queue target.
    pub const TASK: &str = "horizon_entry_core::task";
    /// Style resolution target.
    pub const STYLE: &str = "horizon_entry_style";
    /// Entry widget target.
    pub const ENTRY: &str = "horizon_entry::entry";
    /// Clipboard service target.
    pub const CLIPBOARD: &str = "horizon_entry::clipboard";
    /// Texture cache target.
    pub const TEXTURE: &str = "horizon_entry::texture";
}
