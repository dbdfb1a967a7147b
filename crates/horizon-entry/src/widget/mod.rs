//! Widget layer: the shared widget base, the [`Widget`] trait, events and
//! cursor feedback.
//!
//! Widgets are shared across the event loop and deferred callbacks, so every
//! method takes `&self` and mutable state lives behind locks or atomics.
//!
//! # Example
//!
//! ```
//! use horizon_entry::widget::{SizeRequest, Widget, WidgetBase, WidgetEvent};
//! use horizon_entry_core::{Object, ObjectId, Rect};
//!
//! struct Spacer {
//!     base: WidgetBase,
//! }
//!
//! impl Object for Spacer {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! impl Widget for Spacer {
//!     fn widget_base(&self) -> &WidgetBase {
//!         &self.base
//!     }
//!
//!     fn preferred_width(&self, _for_height: Option<f32>) -> SizeRequest {
//!         SizeRequest::new(0.0, 10.0)
//!     }
//!
//!     fn preferred_height(&self, _for_width: Option<f32>) -> SizeRequest {
//!         SizeRequest::fixed(4.0)
//!     }
//!
//!     fn allocate(&self, rect: Rect) {
//!         self.base.set_geometry(rect);
//!     }
//!
//!     fn event(&self, _event: &mut WidgetEvent) -> bool {
//!         false
//!     }
//! }
//!
//! let spacer = Spacer { base: WidgetBase::new::<Spacer>() };
//! spacer.allocate(Rect::new(0.0, 0.0, 10.0, 4.0));
//! assert_eq!(spacer.geometry().width(), 10.0);
//! ```

pub mod cursor;
pub mod events;

use std::sync::atomic::{AtomicBool, Ordering};

use horizon_entry_core::{Object, ObjectBase, ObjectId, ObjectResult, Point, Rect};
use parking_lot::RwLock;

pub use cursor::{CursorManager, CursorShape};
pub use events::{
    EnterEvent, EventBase, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent,
    KeyboardModifiers, LeaveEvent, MouseButton, MousePressEvent, MouseReleaseEvent, WidgetEvent,
};

/// Minimum and natural extent along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeRequest {
    /// Smallest usable extent.
    pub minimum: f32,
    /// Extent the widget would like.
    pub natural: f32,
}

impl SizeRequest {
    /// A request with distinct minimum and natural extents.
    pub const fn new(minimum: f32, natural: f32) -> Self {
        Self { minimum, natural }
    }

    /// A request whose minimum equals its natural extent.
    pub const fn fixed(size: f32) -> Self {
        Self::new(size, size)
    }

    /// Grow both extents by the same amount.
    pub fn expand(self, amount: f32) -> Self {
        Self::new(self.minimum + amount, self.natural + amount)
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.minimum.max(other.minimum), self.natural.max(other.natural))
    }
}

/// State shared by every widget: object identity, geometry and flags.
pub struct WidgetBase {
    object: ObjectBase,
    geometry: RwLock<Rect>,
    needs_relayout: AtomicBool,
    reactive: AtomicBool,
}

impl WidgetBase {
    /// Create a widget base, registering the widget in the global registry.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object: ObjectBase::new::<T>(),
            geometry: RwLock::new(Rect::default()),
            needs_relayout: AtomicBool::new(true),
            reactive: AtomicBool::new(false),
        }
    }

    /// The widget's object id.
    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    /// The underlying object base.
    pub fn object(&self) -> &ObjectBase {
        &self.object
    }

    /// Whether the widget is still registered.
    pub fn is_alive(&self) -> bool {
        self.object.is_alive()
    }

    /// The widget's name (matched by `#id` selectors).
    pub fn name(&self) -> String {
        self.object.name()
    }

    /// Set the widget's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object.set_name(name);
    }

    /// The parent widget's id.
    pub fn parent(&self) -> Option<ObjectId> {
        self.object.parent()
    }

    /// Reparent the widget.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object.set_parent(parent)
    }

    /// Ids of child objects.
    pub fn children(&self) -> Vec<ObjectId> {
        self.object.children()
    }

    /// The last allocated rectangle, in the parent's coordinates.
    pub fn geometry(&self) -> Rect {
        *self.geometry.read()
    }

    /// Record an allocation. Clears any pending relayout request.
    pub fn set_geometry(&self, rect: Rect) {
        *self.geometry.write() = rect;
        self.needs_relayout.store(false, Ordering::Release);
    }

    /// Whether `point`, in the parent's coordinates, lies inside the widget.
    pub fn contains(&self, point: Point) -> bool {
        self.geometry().contains(point)
    }

    /// Ask for a new layout pass.
    pub fn queue_relayout(&self) {
        self.needs_relayout.store(true, Ordering::Release);
    }

    /// Whether a layout pass has been requested since the last allocation.
    pub fn needs_relayout(&self) -> bool {
        self.needs_relayout.load(Ordering::Acquire)
    }

    /// Whether the widget receives pointer events.
    pub fn is_reactive(&self) -> bool {
        self.reactive.load(Ordering::Acquire)
    }

    /// Set whether the widget receives pointer events.
    pub fn set_reactive(&self, reactive: bool) {
        self.reactive.store(reactive, Ordering::Release);
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id())
            .field("geometry", &self.geometry())
            .field("reactive", &self.is_reactive())
            .finish()
    }
}

/// The interface every widget implements.
pub trait Widget: Object {
    /// The shared widget state.
    fn widget_base(&self) -> &WidgetBase;

    /// Width request, optionally for a given height.
    fn preferred_width(&self, for_height: Option<f32>) -> SizeRequest;

    /// Height request, optionally for a given width.
    fn preferred_height(&self, for_width: Option<f32>) -> SizeRequest;

    /// Assign the widget's box and lay out its children.
    fn allocate(&self, rect: Rect);

    /// Handle an event. Returns `true` if the event was consumed.
    fn event(&self, event: &mut WidgetEvent) -> bool;

    /// The object that takes keyboard focus when this widget is focused.
    fn focus_target(&self) -> ObjectId {
        self.widget_base().id()
    }

    /// The last allocated rectangle.
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }
}
