//! Pointer cursor feedback.
//!
//! Widgets record the cursor shape they want in a [`CursorManager`]; the
//! windowing layer polls [`CursorManager::take_dirty`] and applies the
//! resulting [`CursorIcon`] to its window.
//!
//! Override cursors stack and take precedence over the widget cursor:
//!
//! ```
//! use horizon_entry::widget::cursor::{CursorManager, CursorShape};
//!
//! let cursors = CursorManager::new();
//! cursors.set_cursor(CursorShape::IBeam);
//! cursors.set_override_cursor(CursorShape::Wait);
//! assert_eq!(cursors.effective_cursor(), CursorShape::Wait);
//! cursors.restore_override_cursor();
//! assert_eq!(cursors.effective_cursor(), CursorShape::IBeam);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use cursor_icon::CursorIcon;
use horizon_entry_core::logging::targets;
use parking_lot::Mutex;

/// The shape of the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow cursor (platform-specific).
    #[default]
    Arrow,
    /// A crosshair cursor.
    Crosshair,
    /// A pointing hand, used for clickable elements.
    Hand,
    /// An I-beam, used over editable text.
    IBeam,
    /// A "not allowed" cursor.
    Forbidden,
    /// A wait cursor.
    Wait,
}

impl CursorShape {
    /// The platform-neutral cursor icon for this shape.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::Crosshair => CursorIcon::Crosshair,
            CursorShape::Hand => CursorIcon::Pointer,
            CursorShape::IBeam => CursorIcon::Text,
            CursorShape::Forbidden => CursorIcon::NotAllowed,
            CursorShape::Wait => CursorIcon::Wait,
        }
    }
}

#[derive(Debug, Default)]
struct CursorState {
    override_stack: Vec<CursorShape>,
    widget_cursor: CursorShape,
}

impl CursorState {
    fn effective(&self) -> CursorShape {
        self.override_stack
            .last()
            .copied()
            .unwrap_or(self.widget_cursor)
    }
}

/// Cursor state for one window.
#[derive(Debug, Default)]
pub struct CursorManager {
    state: Mutex<CursorState>,
    dirty: AtomicBool,
}

impl CursorManager {
    /// A manager showing the arrow cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the widget cursor.
    pub fn set_cursor(&self, shape: CursorShape) {
        let mut state = self.state.lock();
        if state.widget_cursor != shape {
            tracing::trace!(target: targets::ENTRY, from = ?state.widget_cursor, to = ?shape, "cursor changed");
            state.widget_cursor = shape;
            self.dirty.store(true, Ordering::Release);
        }
    }

    /// Restore the default arrow as the widget cursor.
    pub fn set_default_cursor(&self) {
        self.set_cursor(CursorShape::Arrow);
    }

    /// The widget cursor, ignoring overrides.
    pub fn cursor(&self) -> CursorShape {
        self.state.lock().widget_cursor
    }

    /// Push an override cursor onto the stack.
    pub fn set_override_cursor(&self, shape: CursorShape) {
        self.state.lock().override_stack.push(shape);
        self.dirty.store(true, Ordering::Release);
    }

    /// Pop the active override cursor, if any.
    pub fn restore_override_cursor(&self) {
        if self.state.lock().override_stack.pop().is_some() {
            self.dirty.store(true, Ordering::Release);
        }
    }

    /// Whether an override cursor is active.
    pub fn has_override_cursor(&self) -> bool {
        !self.state.lock().override_stack.is_empty()
    }

    /// The shape to display: the top override, else the widget cursor.
    pub fn effective_cursor(&self) -> CursorShape {
        self.state.lock().effective()
    }

    /// Whether a change is waiting to be applied.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clear the dirty flag, returning the icon to apply if it was set.
    pub fn take_dirty(&self) -> Option<CursorIcon> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(self.effective_cursor().to_cursor_icon())
    }
}
