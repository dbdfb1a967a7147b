//! Widgets composing the entry.
//!
//! - [`Entry`]: the single-line entry itself
//! - [`TextNode`]: the editable text region it wraps
//! - [`IconActor`]: an image that emits `clicked`

mod entry;
mod icon;
mod text_node;

pub use entry::{Entry, EntryProperty, IconPosition, PickResult};
pub use icon::IconActor;
pub use text_node::{AverageAdvanceMetrics, FixedTextMetrics, TextMetrics, TextNode};
