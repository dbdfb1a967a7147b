//! Main style resolution engine.

use std::path::Path;

use horizon_entry_core::ObjectId;
use horizon_entry_core::logging::targets;
use parking_lot::{Mutex, RwLock};

use crate::Result;
use crate::resolve::cache::{StyleCache, StyleCacheKey};
use crate::resolve::cascade::cascade_properties;
use crate::resolve::inheritance::resolve_properties;
use crate::rules::{StylePriority, StyleRule, StyleSheet};
use crate::selector::{PseudoClass, SelectorMatcher, SpecificityWithOrder, StyleNode};
use crate::style::{ComputedStyle, StyleProperties};

/// Context for style resolution.
///
/// Everything needed to match selectors against one widget and to resolve
/// inherited and relative values.
#[derive(Debug, Clone)]
pub struct StyleContext<'a> {
    /// Widget type name (e.g., "Entry").
    pub type_name: &'a str,
    /// Object name (for ID selector matching).
    pub name: Option<&'a str>,
    /// Style classes.
    pub classes: &'a [String],
    /// Current pseudo-class.
    pub pseudo_class: Option<PseudoClass>,
    /// Ancestors, nearest first (for combinators).
    pub ancestors: &'a [StyleNode<'a>],
    /// Parent's computed style (for inheritance).
    pub parent_style: Option<&'a ComputedStyle>,
    /// Root font size (for rem units).
    pub root_font_size: f32,
}

impl<'a> StyleContext<'a> {
    /// A context for a widget type with no name, classes or ancestors.
    pub fn new(type_name: &'a str) -> Self {
        Self {
            type_name,
            name: None,
            classes: &[],
            pseudo_class: None,
            ancestors: &[],
            parent_style: None,
            root_font_size: StyleEngine::DEFAULT_ROOT_FONT_SIZE,
        }
    }

    /// Set the pseudo-class.
    pub fn with_pseudo_class(mut self, pseudo_class: Option<PseudoClass>) -> Self {
        self.pseudo_class = pseudo_class;
        self
    }

    /// The node selectors are matched against.
    pub fn node(&self) -> StyleNode<'a> {
        StyleNode {
            type_name: self.type_name,
            name: self.name,
            classes: self.classes,
            pseudo_class: self.pseudo_class,
        }
    }
}

/// Computes styles for widgets. Implemented by [`StyleEngine`].
pub trait StyleResolver: Send + Sync {
    /// Compute the style of an object in the given context, with optional
    /// inline properties applied on top of every matched rule.
    fn compute_style(
        &self,
        object_id: ObjectId,
        context: &StyleContext<'_>,
        inline_style: Option<&StyleProperties>,
    ) -> ComputedStyle;

    /// Forget anything cached for an object whose name or classes changed.
    fn invalidate(&self, _object_id: ObjectId) {}
}

/// The main style resolution engine.
///
/// The engine manages stylesheets, matches selectors, cascades properties,
/// and resolves final computed styles. It is shared between widgets, so all
/// state sits behind locks.
pub struct StyleEngine {
    stylesheets: RwLock<Vec<StyleSheet>>,
    cache: Mutex<StyleCache>,
    root_font_size: f32,
}

impl StyleEngine {
    /// Root font size used unless configured otherwise.
    pub const DEFAULT_ROOT_FONT_SIZE: f32 = 16.0;

    /// Create an engine with no stylesheets.
    pub fn new() -> Self {
        Self::with_root_font_size(Self::DEFAULT_ROOT_FONT_SIZE)
    }

    /// Create an engine with a specific root font size.
    pub fn with_root_font_size(root_font_size: f32) -> Self {
        Self {
            stylesheets: RwLock::new(vec![]),
            cache: Mutex::new(StyleCache::new()),
            root_font_size,
        }
    }

    /// Get the root font size.
    pub fn root_font_size(&self) -> f32 {
        self.root_font_size
    }

    /// Add a stylesheet.
    pub fn add_stylesheet(&self, stylesheet: StyleSheet) {
        tracing::debug!(
            target: targets::STYLE,
            priority = ?stylesheet.priority,
            rules = stylesheet.len(),
            "adding stylesheet"
        );
        let mut sheets = self.stylesheets.write();
        sheets.push(stylesheet);
        sheets.sort_by_key(|s| s.priority);
        drop(sheets);
        self.invalidate_all();
    }

    /// Load a CSS file and add it.
    pub fn load_stylesheet(&self, path: impl AsRef<Path>, priority: StylePriority) -> Result<()> {
        let sheet = StyleSheet::from_file(path, priority)?;
        self.add_stylesheet(sheet);
        Ok(())
    }

    /// Remove stylesheets loaded from a specific file.
    pub fn remove_stylesheet_by_path(&self, path: &Path) {
        self.stylesheets
            .write()
            .retain(|s| s.source_path.as_deref() != Some(path));
        self.invalidate_all();
    }

    /// Clear all stylesheets.
    pub fn clear_stylesheets(&self) {
        self.stylesheets.write().clear();
        self.invalidate_all();
    }

    /// Invalidate cached styles of one object.
    pub fn invalidate(&self, object_id: ObjectId) {
        self.cache.lock().invalidate(object_id);
    }

    /// Invalidate all cached styles.
    pub fn invalidate_all(&self) {
        self.cache.lock().invalidate_all();
    }

    /// Get the number of loaded stylesheets.
    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.read().len()
    }

    /// Get the total number of rules across all stylesheets.
    pub fn rule_count(&self) -> usize {
        self.stylesheets.read().iter().map(|s| s.len()).sum()
    }

    /// Get the number of cached styles.
    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }

    fn cascade(&self, context: &StyleContext<'_>, inline_style: Option<&StyleProperties>) -> StyleProperties {
        let node = context.node();
        let sheets = self.stylesheets.read();

        let mut matched: Vec<(&StyleRule, SpecificityWithOrder)> = vec![];
        let mut global_order = 0u32;
        for sheet in sheets.iter() {
            let priority_offset = sheet.priority.as_order_offset();
            for rule in &sheet.rules {
                if SelectorMatcher::matches(&rule.selector, &node, context.ancestors) {
                    let order = priority_offset | global_order;
                    matched.push((rule, rule.specificity.with_order(order)));
                    global_order += 1;
                }
            }
        }

        // Lower specificity first, so later ones override.
        matched.sort_by_key(|(_, spec)| *spec);

        let mut cascaded = StyleProperties::default();
        for (rule, _) in &matched {
            cascade_properties(&mut cascaded, &rule.properties);
        }
        if let Some(inline) = inline_style {
            cascade_properties(&mut cascaded, inline);
        }

        tracing::trace!(
            target: targets::STYLE,
            type_name = context.type_name,
            pseudo_class = ?context.pseudo_class,
            matched = matched.len(),
            "cascaded style"
        );
        cascaded
    }
}

impl StyleResolver for StyleEngine {
    fn compute_style(
        &self,
        object_id: ObjectId,
        context: &StyleContext<'_>,
        inline_style: Option<&StyleProperties>,
    ) -> ComputedStyle {
        let cache_key = StyleCacheKey::new(object_id, context.pseudo_class);
        if inline_style.is_none()
            && let Some(cached) = self.cache.lock().get(&cache_key)
        {
            return cached.clone();
        }

        let cascaded = self.cascade(context, inline_style);
        let computed = resolve_properties(&cascaded, context.parent_style, context.root_font_size);

        if inline_style.is_none() {
            self.cache.lock().insert(cache_key, computed.clone());
        }
        computed
    }

    fn invalidate(&self, object_id: ObjectId) {
        StyleEngine::invalidate(self, object_id);
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("stylesheets", &self.stylesheet_count())
            .field("rules", &self.rule_count())
            .field("root_font_size", &self.root_font_size)
            .finish()
    }
}
