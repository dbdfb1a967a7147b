//! Horizon Entry - a single-line text entry widget.
//!
//! [`Entry`] wraps an editable text region with optional leading and
//! trailing icons. While empty and unfocused it displays hint text, and it
//! handles the clipboard chords (Ctrl+V, Ctrl+C, Ctrl+X) itself.
//!
//! Host services (clipboard, textures, pointer cursor, style resolution and
//! the deferred task queue) are passed in through [`EntryServices`], so the
//! widget runs the same headless as under a real event loop.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_entry::prelude::*;
//!
//! init_global_registry();
//! let (services, clipboard) = EntryServices::headless();
//! let tasks = Arc::clone(&services.tasks);
//! let entry = Entry::new("hello", services);
//!
//! entry.text_node().select_all();
//! let mut copy = WidgetEvent::KeyPress(KeyPressEvent::new(
//!     Key::C,
//!     KeyboardModifiers::CTRL,
//!     "",
//!     false,
//! ));
//! assert!(entry.event(&mut copy));
//! assert_eq!(clipboard.contents().as_deref(), Some("hello"));
//!
//! entry.text_node().set_cursor_position(5);
//! let mut paste = WidgetEvent::KeyPress(KeyPressEvent::new(
//!     Key::V,
//!     KeyboardModifiers::CTRL,
//!     "",
//!     false,
//! ));
//! assert!(entry.event(&mut paste));
//! tasks.process_all();
//! assert_eq!(entry.text(), "hellohello");
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod services;
pub mod widget;
pub mod widgets;

pub use config::EntryConfig;
pub use error::{EntryError, Result};
pub use services::EntryServices;
pub use widgets::{Entry, IconPosition};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::EntryConfig;
    pub use crate::error::{EntryError, Result};
    pub use crate::platform::{Clipboard, MemoryClipboard, Texture, TextureCache};
    pub use crate::services::EntryServices;
    pub use crate::widget::{
        CursorManager, CursorShape, EnterEvent, FocusInEvent, FocusOutEvent, FocusReason, Key,
        KeyPressEvent, KeyboardModifiers, LeaveEvent, MouseButton, MousePressEvent,
        MouseReleaseEvent, SizeRequest, Widget, WidgetEvent,
    };
    pub use crate::widgets::{
        Entry, FixedTextMetrics, IconActor, IconPosition, PickResult, TextMetrics, TextNode,
    };
    pub use horizon_entry_core::{init_global_registry, Color, Object, ObjectId, Point, Rect, Size};
    pub use horizon_entry_style::prelude::{
        PropertyValue, PseudoClass, Stylable, StyleEngine, StylePriority, StyleSheet,
    };
}

static_assertions::assert_impl_all!(Entry: Send, Sync);
static_assertions::assert_impl_all!(EntryServices: Send, Sync);
