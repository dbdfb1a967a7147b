//! Style caching for performance.

use std::collections::HashMap;

use horizon_entry_core::ObjectId;

use crate::selector::PseudoClass;
use crate::style::ComputedStyle;

/// Cache key for computed styles: the object plus the state that selects rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleCacheKey {
    object_id: ObjectId,
    pseudo_class: Option<PseudoClass>,
}

impl StyleCacheKey {
    /// Create a new cache key.
    pub fn new(object_id: ObjectId, pseudo_class: Option<PseudoClass>) -> Self {
        Self {
            object_id,
            pseudo_class,
        }
    }
}

/// Bounded cache for computed styles.
pub struct StyleCache {
    cache: HashMap<StyleCacheKey, ComputedStyle>,
    max_size: usize,
}

impl StyleCache {
    /// Create a new style cache.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_size),
            max_size,
        }
    }

    /// Get a cached style.
    pub fn get(&self, key: &StyleCacheKey) -> Option<&ComputedStyle> {
        self.cache.get(key)
    }

    /// Insert a computed style into the cache.
    pub fn insert(&mut self, key: StyleCacheKey, style: ComputedStyle) {
        if self.cache.len() >= self.max_size {
            self.evict_half();
        }
        self.cache.insert(key, style);
    }

    /// Drop every cached entry of one object.
    pub fn invalidate(&mut self, object_id: ObjectId) {
        self.cache.retain(|k, _| k.object_id != object_id);
    }

    /// Invalidate all cached styles.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn evict_half(&mut self) {
        let target = self.cache.len() / 2;
        let keys: Vec<_> = self.cache.keys().take(target).copied().collect();
        for key in keys {
            self.cache.remove(&key);
        }
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_entry_core::{Object, ObjectRegistry};

    struct Marker;

    impl Object for Marker {
        fn object_id(&self) -> ObjectId {
            ObjectId::default()
        }
    }

    #[test]
    fn pseudo_class_is_part_of_the_key() {
        let mut registry = ObjectRegistry::new();
        let id = registry.register::<Marker>();
        let mut cache = StyleCache::new();

        cache.insert(StyleCacheKey::new(id, None), ComputedStyle::default());
        assert!(cache.get(&StyleCacheKey::new(id, Some(PseudoClass::Focus))).is_none());
        assert!(cache.get(&StyleCacheKey::new(id, None)).is_some());

        cache.invalidate(id);
        assert!(cache.is_empty());
    }

    #[test]
    fn eviction_keeps_cache_bounded() {
        let mut registry = ObjectRegistry::new();
        let mut cache = StyleCache::with_capacity(4);
        for _ in 0..10 {
            let id = registry.register::<Marker>();
            cache.insert(StyleCacheKey::new(id, None), ComputedStyle::default());
        }
        assert!(cache.len() <= 4);
    }
}
