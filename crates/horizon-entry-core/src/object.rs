//! Object model for Horizon Entry.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Parent-child ownership relationships with drop cascade
//! - Object naming for style selectors and debugging
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object
//! - [`ObjectRegistry`] - Central registry managing all objects
//! - [`SharedObjectRegistry`] - Thread-safe wrapper around [`ObjectRegistry`]
//!
//! A destroyed object's id stays a valid key type but no longer resolves in
//! the registry. Every lookup through a stale id returns
//! [`ObjectError::InvalidObjectId`], which widgets treat as "invalid
//! instance" and turn into a logged no-op.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object tree changes.
    /// They become invalid when the object is destroyed.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
    /// The object registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
            Self::RegistryNotInitialized => write!(f, "Object registry not initialized"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

struct ObjectData {
    name: String,
    type_name: &'static str,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

impl ObjectData {
    fn new(type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_name,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The central registry that manages all objects and their relationships.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object and return its ID.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let data = ObjectData::new(std::any::type_name::<T>());
        let id = self.objects.insert(data);
        tracing::trace!(target: "horizon_entry_core::object", ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Remove an object and all its descendants from the registry.
    #[tracing::instrument(skip(self), target = "horizon_entry_core::object", level = "trace")]
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: "horizon_entry_core::object", ?id, descendant_count = descendants.len(), "destroying object tree");

        if let Some(parent_id) = self.objects.get(id).and_then(|d| d.parent)
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        for child_id in descendants {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);

        Ok(())
    }

    /// Collect all descendant IDs, children before their parents.
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Set the parent of an object.
    ///
    /// Removes the object from its old parent's children and appends it to
    /// the new parent's. Passing `None` makes the object a root object.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.objects.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.push(id);
        }

        tracing::trace!(target: "horizon_entry_core::object", ?id, ?old_parent, ?new_parent, "reparented object");
        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the chain of ancestors, nearest first.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        let mut current = self.parent(id)?;
        while let Some(parent_id) = current {
            result.push(parent_id);
            current = self.objects.get(parent_id).and_then(|d| d.parent);
        }
        Ok(result)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name;
        Ok(())
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Debug dump of the object tree.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.dump_object_tree_recursive(id, 0, &mut output)?;
        Ok(output)
    }

    fn dump_object_tree_recursive(
        &self,
        id: ObjectId,
        depth: usize,
        output: &mut String,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let indent = "  ".repeat(depth);
        let name_display = if data.name.is_empty() {
            "(unnamed)"
        } else {
            &data.name
        };
        output.push_str(&format!(
            "{}[{:?}] {} ({})\n",
            indent, id, name_display, data.type_name
        ));
        for &child_id in &data.children {
            self.dump_object_tree_recursive(child_id, depth + 1, output)?;
        }
        Ok(())
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`ObjectRegistry`].
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared object registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// Register a new object.
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object and its children.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set the parent of an object.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of an object (returns owned Vec for thread safety).
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get the chain of ancestors, nearest first.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().ancestors(id)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(str::to_owned)
    }

    /// Set the object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Debug dump of the object tree rooted at `id`.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().dump_object_tree(id)
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Initialize the global object registry.
///
/// Idempotent; returns the registry so callers can use it immediately.
pub fn init_global_registry() -> &'static SharedObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(|| {
        tracing::debug!(target: "horizon_entry_core::object", "initialized global object registry");
        SharedObjectRegistry::new()
    })
}

/// Get a reference to the global object registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    GLOBAL_REGISTRY
        .get()
        .ok_or(ObjectError::RegistryNotInitialized)
}

/// The base trait that all objects must implement.
pub trait Object: Any + Send + Sync {
    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId;
}

/// Helper for implementing the [`Object`] trait.
///
/// Include this as a field in your object types. On construction it
/// registers the object with the global registry (initializing the registry
/// if needed); on drop it destroys the object and any children still
/// attached to it.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Create a new ObjectBase, registering the object in the global registry.
    pub fn new<T: Object + 'static>() -> Self {
        let id = init_global_registry().register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Whether the object is still registered.
    pub fn is_alive(&self) -> bool {
        global_registry().is_ok_and(|r| r.contains(self.id))
    }

    /// Get the object's name from the registry.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }

    /// Get the parent object ID.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Set the parent object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get child object IDs.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase").field("id", &self.id).finish()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        if let Ok(registry) = global_registry() {
            // Already gone when an ancestor's destroy cascaded over us.
            let _ = registry.destroy(self.id);
        }
    }
}
