//! Core systems for Horizon Entry.
//!
//! This crate provides the foundation the entry widget is built on:
//!
//! - **Object Model**: Registry of object ids with parent-child ownership
//! - **Signal/Slot System**: Typed observer lists for notifications
//! - **Task Queue**: Deferred callbacks drained by the host event loop
//! - **Geometry**: Points, sizes, rectangles and colors
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_entry_core::Signal;
//!
//! let clicked = Signal::<()>::new();
//! let id = clicked.connect(|_| println!("clicked"));
//! clicked.emit(());
//! clicked.disconnect(id);
//! ```
//!
//! # Object Tree Example
//!
//! ```
//! use horizon_entry_core::{init_global_registry, Object, ObjectBase, ObjectId};
//!
//! struct Node {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Node {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! init_global_registry();
//! let parent = Node { base: ObjectBase::new::<Node>() };
//! let child = Node { base: ObjectBase::new::<Node>() };
//! child.base.set_parent(Some(parent.object_id())).unwrap();
//! assert_eq!(parent.base.children(), vec![child.object_id()]);
//! ```

pub mod logging;
pub mod object;
pub mod signal;
pub mod task;
pub mod types;

pub use object::{
    global_registry, init_global_registry, Object, ObjectBase, ObjectError, ObjectId,
    ObjectRegistry, ObjectResult, SharedObjectRegistry,
};
pub use signal::{ConnectionId, Signal};
pub use task::{TaskId, TaskQueue};
pub use types::{Color, Point, Rect, Size};

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(TaskQueue: Send, Sync);
static_assertions::assert_impl_all!(SharedObjectRegistry: Send, Sync);
