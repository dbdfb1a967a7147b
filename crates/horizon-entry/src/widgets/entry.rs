//! Single-line text entry with hint text, icons and clipboard shortcuts.
//!
//! `Entry` wraps a [`TextNode`] and up to two [`IconActor`]s. It owns the
//! focus/hint state machine: while the entry is empty, unfocused and has a
//! hint, the text node displays the hint and the entry carries the
//! `indeterminate` pseudo-class; while focused it carries `focus`.
//!
//! Key events go to the text node first, except that while the hint is
//! displayed only typed text is forwarded (clearing the hint). Whatever the
//! node leaves unconsumed is checked for the Ctrl+V, Ctrl+C and Ctrl+X
//! chords, which the entry always consumes.
//!
//! # Example
//!
//! ```
//! use horizon_entry::prelude::*;
//!
//! let (services, _clipboard) = EntryServices::headless();
//! let entry = Entry::new("", services);
//! entry.set_hint_text(Some("Search"));
//!
//! assert!(entry.is_hint_visible());
//! assert_eq!(entry.text(), "");
//! assert_eq!(entry.text_node().text(), "Search");
//! assert_eq!(entry.pseudo_class(), Some(PseudoClass::Indeterminate));
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use horizon_entry_core::logging::targets;
use horizon_entry_core::{Color, ConnectionId, Object, ObjectId, Point, Rect, Signal};
use horizon_entry_style::prelude::{ComputedStyle, PropertyKind, PropertyValue, PseudoClass, StyleProperties};
use horizon_entry_style::{StyleContext, Stylable, StylePropertyRegistry, StylePropertySpec};
use parking_lot::RwLock;

use super::icon::IconActor;
use super::text_node::TextNode;
use crate::config::{EntryConfig, font_name};
use crate::error::{EntryError, Result};
use crate::services::EntryServices;
use crate::widget::{
    CursorShape, KeyPressEvent, MouseButton, SizeRequest, Widget, WidgetBase, WidgetEvent,
};

/// Which side of the entry an icon sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconPosition {
    /// Leading icon, at the left edge.
    Primary,
    /// Trailing icon, at the right edge.
    Secondary,
}

/// The entry's named properties, for access by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryProperty {
    /// The real text; empty while the hint is displayed.
    Text,
    /// The hint shown while empty and unfocused.
    HintText,
}

impl EntryProperty {
    /// Look up a property by its name (`"text"` or `"hint-text"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "hint-text" => Some(Self::HintText),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::HintText => "hint-text",
        }
    }
}

/// What lies under a point, from [`Entry::pick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickResult {
    /// An icon.
    Icon(IconPosition, ObjectId),
    /// The text node.
    Text(ObjectId),
    /// The entry itself (padding or spacing).
    Entry(ObjectId),
}

impl PickResult {
    /// Id of the picked object.
    pub fn object_id(self) -> ObjectId {
        match self {
            Self::Icon(_, id) | Self::Text(id) | Self::Entry(id) => id,
        }
    }
}

struct IconSlot {
    actor: Arc<IconActor>,
    connection: ConnectionId,
}

struct EntryInner {
    base: WidgetBase,
    text_node: Arc<TextNode>,
    hint: RwLock<Option<String>>,
    hint_visible: AtomicBool,
    has_focus: AtomicBool,
    spacing: RwLock<f32>,
    primary: RwLock<Option<IconSlot>>,
    secondary: RwLock<Option<IconSlot>>,
    pseudo_class: RwLock<Option<PseudoClass>>,
    style_classes: RwLock<Vec<String>>,
    inline_style: RwLock<StyleProperties>,
    style: RwLock<ComputedStyle>,
    registry: StylePropertyRegistry,
    caret_default: Color,
    selection_default: Color,
    font_family_default: Option<String>,
    font_size_default: Option<f32>,
    services: EntryServices,
    primary_icon_clicked: Signal<()>,
    secondary_icon_clicked: Signal<()>,
    text_changed: Signal<String>,
}

/// A single-line text entry.
///
/// Cloning an `Entry` gives another handle to the same widget.
#[derive(Clone)]
pub struct Entry {
    inner: Arc<EntryInner>,
}

impl Entry {
    /// Type name matched by `Entry` selectors.
    pub const TYPE_NAME: &'static str = "Entry";

    /// Create an entry showing `text`, with the default configuration.
    pub fn new(text: &str, services: EntryServices) -> Self {
        Self::with_config(text, services, &EntryConfig::default())
    }

    /// Create an entry showing `text`.
    pub fn with_config(text: &str, services: EntryServices, config: &EntryConfig) -> Self {
        let caret_default = config_color(config.caret_color(), "caret_color");
        let selection_default = config_color(config.selection_color(), "selection_color");

        let mut registry = StylePropertyRegistry::new(Self::TYPE_NAME);
        for (name, default) in [
            ("caret-color", caret_default),
            ("selection-background-color", selection_default),
        ] {
            if let Err(err) = registry.register(StylePropertySpec::new(name, PropertyKind::Color, default.into())) {
                tracing::warn!(target: targets::ENTRY, error = %err, "failed to register style property");
            }
        }

        let text_node = Arc::new(TextNode::with_metrics("", Arc::clone(&services.metrics)));
        text_node.set_editable(true);
        text_node.set_single_line(true);
        text_node.set_cursor_visible(false);
        if let Some(font) = config.font_name() {
            text_node.set_font_name(font);
        }

        let inner = Arc::new(EntryInner {
            base: WidgetBase::new::<Entry>(),
            text_node,
            hint: RwLock::new(None),
            hint_visible: AtomicBool::new(false),
            has_focus: AtomicBool::new(false),
            spacing: RwLock::new(config.spacing),
            primary: RwLock::new(None),
            secondary: RwLock::new(None),
            pseudo_class: RwLock::new(None),
            style_classes: RwLock::new(Vec::new()),
            inline_style: RwLock::new(StyleProperties::new()),
            style: RwLock::new(ComputedStyle::default()),
            registry,
            caret_default,
            selection_default,
            font_family_default: config.font_family.clone(),
            font_size_default: config.font_size,
            services,
            primary_icon_clicked: Signal::new(),
            secondary_icon_clicked: Signal::new(),
            text_changed: Signal::new(),
        });

        inner.base.set_reactive(true);
        if let Err(err) = inner.text_node.widget_base().set_parent(Some(inner.base.id())) {
            tracing::warn!(target: targets::ENTRY, error = %err, "failed to parent text node");
        }

        inner.style_changed();
        inner.set_text(text);

        tracing::debug!(target: targets::ENTRY, id = ?inner.base.id(), "created entry");
        Self { inner }
    }

    fn is_valid(&self, operation: &'static str) -> bool {
        self.inner.is_valid(operation)
    }

    // =========================================================================
    // Text and hint
    // =========================================================================

    /// The entry's text. Empty while the hint is displayed.
    pub fn text(&self) -> String {
        if !self.is_valid("text") {
            return String::new();
        }
        self.inner.text()
    }

    /// Replace the text.
    ///
    /// Setting empty text while unfocused displays the hint, if there is one.
    pub fn set_text(&self, text: &str) {
        if self.is_valid("set_text") {
            self.inner.set_text(text);
        }
    }

    /// The hint shown while the entry is empty and unfocused.
    pub fn hint_text(&self) -> Option<String> {
        if !self.is_valid("hint_text") {
            return None;
        }
        self.inner.hint.read().clone()
    }

    /// Set or clear the hint. Takes effect immediately.
    pub fn set_hint_text(&self, hint: Option<&str>) {
        if self.is_valid("set_hint_text") {
            self.inner.set_hint_text(hint);
        }
    }

    /// Whether the text node is displaying the hint.
    pub fn is_hint_visible(&self) -> bool {
        self.inner.hint_visible()
    }

    /// Whether the text node has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.inner.has_focus()
    }

    /// The embedded text node, for settings the entry does not expose.
    pub fn text_node(&self) -> &Arc<TextNode> {
        &self.inner.text_node
    }

    /// Read a property by name.
    pub fn property(&self, name: &str) -> Result<Option<String>> {
        match EntryProperty::from_name(name) {
            Some(EntryProperty::Text) => Ok(Some(self.text())),
            Some(EntryProperty::HintText) => Ok(self.hint_text()),
            None => Err(EntryError::UnknownProperty(name.to_string())),
        }
    }

    /// Write a property by name. `None` sets empty text or clears the hint.
    pub fn set_property(&self, name: &str, value: Option<&str>) -> Result<()> {
        match EntryProperty::from_name(name) {
            Some(EntryProperty::Text) => self.set_text(value.unwrap_or_default()),
            Some(EntryProperty::HintText) => self.set_hint_text(value),
            None => return Err(EntryError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }

    // =========================================================================
    // Icons
    // =========================================================================

    /// Show the image at `path` as the leading icon, or remove it with `None`.
    pub fn set_primary_icon_from_file(&self, path: Option<impl AsRef<Path>>) {
        if self.is_valid("set_primary_icon_from_file") {
            self.inner
                .set_icon_from_file(IconPosition::Primary, path.as_ref().map(AsRef::<Path>::as_ref));
        }
    }

    /// Show the image at `path` as the trailing icon, or remove it with `None`.
    pub fn set_secondary_icon_from_file(&self, path: Option<impl AsRef<Path>>) {
        if self.is_valid("set_secondary_icon_from_file") {
            self.inner
                .set_icon_from_file(IconPosition::Secondary, path.as_ref().map(AsRef::<Path>::as_ref));
        }
    }

    pub fn primary_icon(&self) -> Option<Arc<IconActor>> {
        self.inner.icon(IconPosition::Primary)
    }

    pub fn secondary_icon(&self) -> Option<Arc<IconActor>> {
        self.inner.icon(IconPosition::Secondary)
    }

    /// Emitted when the leading icon is clicked.
    pub fn primary_icon_clicked(&self) -> &Signal<()> {
        &self.inner.primary_icon_clicked
    }

    /// Emitted when the trailing icon is clicked.
    pub fn secondary_icon_clicked(&self) -> &Signal<()> {
        &self.inner.secondary_icon_clicked
    }

    /// Emitted with the new text when the text is set through the entry.
    pub fn text_changed(&self) -> &Signal<String> {
        &self.inner.text_changed
    }

    // =========================================================================
    // Layout and styling
    // =========================================================================

    /// Gap between an icon and the text region.
    pub fn spacing(&self) -> f32 {
        *self.inner.spacing.read()
    }

    pub fn set_spacing(&self, spacing: f32) {
        *self.inner.spacing.write() = spacing;
        self.inner.base.queue_relayout();
    }

    /// Set the name matched by `#id` selectors.
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.base.set_name(name);
        self.inner.restyle_after_identity_change();
    }

    /// Add a class matched by `.class` selectors.
    pub fn add_style_class(&self, class: impl Into<String>) {
        let class = class.into();
        {
            let mut classes = self.inner.style_classes.write();
            if classes.contains(&class) {
                return;
            }
            classes.push(class);
        }
        self.inner.restyle_after_identity_change();
    }

    /// Remove a style class.
    pub fn remove_style_class(&self, class: &str) {
        let removed = {
            let mut classes = self.inner.style_classes.write();
            let before = classes.len();
            classes.retain(|c| c != class);
            classes.len() != before
        };
        if removed {
            self.inner.restyle_after_identity_change();
        }
    }

    /// The style applied by the last restyle.
    pub fn current_style(&self) -> ComputedStyle {
        self.inner.style.read().clone()
    }

    /// What lies under `point`, in the entry's own coordinates.
    pub fn pick(&self, point: Point) -> Option<PickResult> {
        self.inner.pick(point)
    }
}

impl Object for Entry {
    fn object_id(&self) -> ObjectId {
        self.inner.base.id()
    }
}

impl Widget for Entry {
    fn widget_base(&self) -> &WidgetBase {
        &self.inner.base
    }

    fn preferred_width(&self, for_height: Option<f32>) -> SizeRequest {
        self.inner.preferred_width(for_height)
    }

    fn preferred_height(&self, for_width: Option<f32>) -> SizeRequest {
        self.inner.preferred_height(for_width)
    }

    fn allocate(&self, rect: Rect) {
        self.inner.allocate(rect);
    }

    fn event(&self, event: &mut WidgetEvent) -> bool {
        if !self.is_valid("event") {
            return false;
        }
        self.inner.handle_event(event)
    }

    /// The entry never takes focus itself; its text node does.
    fn focus_target(&self) -> ObjectId {
        self.inner.text_node.object_id()
    }
}

impl Stylable for Entry {
    fn style_type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn pseudo_class(&self) -> Option<PseudoClass> {
        *self.inner.pseudo_class.read()
    }

    fn set_pseudo_class(&self, pseudo_class: Option<PseudoClass>) {
        self.inner.set_pseudo_class(pseudo_class);
    }

    fn style_properties(&self) -> &StylePropertyRegistry {
        &self.inner.registry
    }

    fn computed_style(&self) -> ComputedStyle {
        self.inner.compute_style()
    }

    fn set_inline_property(&self, name: &str, value: PropertyValue) {
        self.inner.inline_style.write().set(name, value);
    }

    fn style_changed(&self) {
        self.inner.style_changed();
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.inner.base.id())
            .field("text", &self.inner.text_node.text())
            .field("hint", &*self.inner.hint.read())
            .field("hint_visible", &self.inner.hint_visible())
            .field("pseudo_class", &*self.inner.pseudo_class.read())
            .finish_non_exhaustive()
    }
}

fn config_color(color: Result<Color>, field: &'static str) -> Color {
    color.unwrap_or_else(|err| {
        tracing::warn!(target: targets::ENTRY, field, error = %err, "using default color");
        Color::from_rgb8(0x00, 0x9c, 0xcf)
    })
}

impl EntryInner {
    fn is_valid(&self, operation: &'static str) -> bool {
        let alive = self.base.is_alive();
        if !alive {
            tracing::warn!(
                target: targets::ENTRY,
                id = ?self.base.id(),
                operation,
                "entry is no longer registered; ignoring"
            );
        }
        alive
    }

    fn hint_visible(&self) -> bool {
        self.hint_visible.load(Ordering::Acquire)
    }

    fn has_focus(&self) -> bool {
        self.has_focus.load(Ordering::Acquire)
    }

    // =========================================================================
    // Focus / hint state machine
    // =========================================================================

    fn text(&self) -> String {
        if self.hint_visible() {
            String::new()
        } else {
            self.text_node.text()
        }
    }

    fn show_hint(&self, hint: &str) {
        self.hint_visible.store(true, Ordering::Release);
        self.text_node.set_text(hint);
        self.set_pseudo_class(Some(PseudoClass::Indeterminate));
    }

    fn hide_hint(&self) {
        self.hint_visible.store(false, Ordering::Release);
        self.text_node.set_text("");
    }

    fn set_text(&self, text: &str) {
        let focused = self.has_focus();
        let hint = self.hint.read().clone();
        match hint {
            Some(hint) if text.is_empty() && !focused => {
                tracing::debug!(target: targets::ENTRY, id = ?self.base.id(), "showing hint for empty text");
                self.show_hint(&hint);
            }
            _ => {
                self.hint_visible.store(false, Ordering::Release);
                self.text_node.set_text(text);
                self.set_pseudo_class(focused.then_some(PseudoClass::Focus));
            }
        }
        self.text_changed.emit(text.to_string());
    }

    fn set_hint_text(&self, hint: Option<&str>) {
        *self.hint.write() = hint.map(str::to_string);
        tracing::debug!(target: targets::ENTRY, id = ?self.base.id(), hint, "hint changed");

        match hint {
            Some(hint) if self.hint_visible() => self.text_node.set_text(hint),
            Some(hint) if !self.has_focus() && self.text_node.is_empty() => self.show_hint(hint),
            None if self.hint_visible() => {
                self.hide_hint();
                self.set_pseudo_class(None);
            }
            _ => {}
        }
    }

    fn focus_in(&self) {
        self.has_focus.store(true, Ordering::Release);
        if self.hint_visible() {
            self.hide_hint();
        }
        self.set_pseudo_class(Some(PseudoClass::Focus));
        self.text_node.set_cursor_visible(true);
        tracing::debug!(target: targets::ENTRY, id = ?self.base.id(), "focus in");
    }

    fn focus_out(&self) {
        self.has_focus.store(false, Ordering::Release);
        let hint = self.hint.read().clone();
        match hint {
            Some(hint) if self.hint_visible() || self.text_node.is_empty() => self.show_hint(&hint),
            _ => self.set_pseudo_class(None),
        }
        self.text_node.set_cursor_visible(false);
        tracing::debug!(target: targets::ENTRY, id = ?self.base.id(), hint_visible = self.hint_visible(), "focus out");
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    fn handle_chord(self: &Arc<Self>, key: &KeyPressEvent) -> bool {
        if !key.modifiers.primary() {
            return false;
        }
        match key.letter() {
            Some('v') => self.paste(),
            Some('c') => self.copy(false),
            Some('x') => self.copy(true),
            _ => return false,
        }
        true
    }

    /// The selection, unless empty or part of a displayed hint.
    fn selection_for_clipboard(&self) -> Option<String> {
        if self.hint_visible() {
            return None;
        }
        Some(self.text_node.selected_text()).filter(|text| !text.is_empty())
    }

    fn copy(&self, cut: bool) {
        let Some(selection) = self.selection_for_clipboard() else {
            return;
        };
        if let Err(err) = self.services.clipboard.set_text(&selection) {
            tracing::warn!(target: targets::ENTRY, error = %err, "failed to write clipboard");
            return;
        }
        if cut {
            self.text_node.delete_selection();
        }
        tracing::debug!(target: targets::ENTRY, id = ?self.base.id(), cut, len = selection.len(), "copied selection");
    }

    fn paste(self: &Arc<Self>) {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.services.clipboard.request_text(Box::new(move |text| match weak.upgrade() {
            Some(inner) => inner.paste_text(text),
            None => {
                tracing::warn!(target: targets::ENTRY, "entry dropped before clipboard text arrived");
            }
        }));
    }

    fn paste_text(&self, text: Option<String>) {
        if !self.is_valid("paste") {
            return;
        }
        let Some(text) = text else {
            return;
        };
        if self.hint_visible() {
            self.hide_hint();
            self.set_pseudo_class(self.has_focus().then_some(PseudoClass::Focus));
        }
        self.text_node.delete_selection();
        self.text_node.insert_text(&text);
        tracing::debug!(target: targets::ENTRY, id = ?self.base.id(), len = text.len(), "pasted");
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn handle_event(self: &Arc<Self>, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::KeyPress(key) => {
                // A displayed hint only gives way to typed text.
                let forward = if !self.hint_visible() {
                    true
                } else if self.is_text_input(key) {
                    self.hide_hint();
                    self.set_pseudo_class(self.has_focus().then_some(PseudoClass::Focus));
                    true
                } else {
                    false
                };
                if forward && self.text_node.event(event) {
                    return true;
                }
                if let WidgetEvent::KeyPress(key) = event
                    && self.handle_chord(key)
                {
                    event.accept();
                    return true;
                }
                false
            }
            WidgetEvent::Enter(crossing) => {
                if crossing.source == self.text_node.object_id() && crossing.related.is_some() {
                    self.services.cursor.set_cursor(CursorShape::IBeam);
                }
                event.accept();
                true
            }
            WidgetEvent::Leave(crossing) => {
                if crossing.source == self.text_node.object_id() && crossing.related.is_some() {
                    self.services.cursor.set_default_cursor();
                }
                event.accept();
                true
            }
            WidgetEvent::MousePress(_) => {
                event.accept();
                true
            }
            WidgetEvent::MouseRelease(release) => {
                if release.button == MouseButton::Left
                    && let Some(PickResult::Icon(position, _)) = self.pick(release.local_pos)
                    && let Some(icon) = self.icon(position)
                {
                    icon.event(event);
                }
                event.accept();
                true
            }
            WidgetEvent::FocusIn(_) => {
                self.focus_in();
                event.accept();
                true
            }
            WidgetEvent::FocusOut(_) => {
                self.focus_out();
                event.accept();
                true
            }
        }
    }

    fn is_text_input(&self, key: &KeyPressEvent) -> bool {
        self.text_node.is_editable()
            && !key.text.is_empty()
            && !key.text.chars().any(char::is_control)
            && !key.modifiers.primary()
            && !key.modifiers.alt
    }

    // =========================================================================
    // Icons
    // =========================================================================

    fn slot(&self, position: IconPosition) -> &RwLock<Option<IconSlot>> {
        match position {
            IconPosition::Primary => &self.primary,
            IconPosition::Secondary => &self.secondary,
        }
    }

    fn clicked_signal(&self, position: IconPosition) -> &Signal<()> {
        match position {
            IconPosition::Primary => &self.primary_icon_clicked,
            IconPosition::Secondary => &self.secondary_icon_clicked,
        }
    }

    fn icon(&self, position: IconPosition) -> Option<Arc<IconActor>> {
        self.slot(position)
            .read()
            .as_ref()
            .map(|slot| Arc::clone(&slot.actor))
    }

    fn set_icon_from_file(self: &Arc<Self>, position: IconPosition, path: Option<&Path>) {
        let previous = self.slot(position).write().take();
        if let Some(previous) = previous {
            previous.actor.clicked.disconnect(previous.connection);
            if let Err(err) = previous.actor.widget_base().set_parent(None) {
                tracing::warn!(target: targets::ENTRY, error = %err, "failed to unparent icon");
            }
            tracing::debug!(target: targets::ENTRY, ?position, path = %previous.actor.path().display(), "removed icon");
        }

        if let Some(path) = path {
            match IconActor::from_file(&self.services.textures, path) {
                Ok(actor) => self.install_icon(position, Arc::new(actor)),
                Err(err) => {
                    tracing::warn!(target: targets::ENTRY, ?position, error = %err, "no icon for file");
                }
            }
        }

        self.base.queue_relayout();
    }

    fn install_icon(self: &Arc<Self>, position: IconPosition, actor: Arc<IconActor>) {
        actor.widget_base().set_reactive(true);
        if let Err(err) = actor.widget_base().set_parent(Some(self.base.id())) {
            tracing::warn!(target: targets::ENTRY, error = %err, "failed to parent icon");
        }

        let weak = Arc::downgrade(self);
        let connection = actor.clicked.connect(move |_| {
            if let Some(inner) = weak.upgrade() {
                tracing::debug!(target: targets::ENTRY, ?position, "icon clicked");
                inner.clicked_signal(position).emit(());
            }
        });

        tracing::debug!(target: targets::ENTRY, ?position, path = %actor.path().display(), "installed icon");
        *self.slot(position).write() = Some(IconSlot { actor, connection });
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn spacing(&self) -> f32 {
        *self.spacing.read()
    }

    fn icons(&self) -> impl Iterator<Item = Arc<IconActor>> {
        [self.icon(IconPosition::Primary), self.icon(IconPosition::Secondary)]
            .into_iter()
            .flatten()
    }

    fn preferred_width(&self, for_height: Option<f32>) -> SizeRequest {
        let padding = self.style.read().padding;
        let spacing = self.spacing();
        let inner_height = for_height.map(|h| (h - padding.vertical()).max(0.0));

        let mut request = self.text_node.preferred_width(inner_height);
        for icon in self.icons() {
            request = request.expand(icon.natural_size().width + spacing);
        }
        request.expand(padding.horizontal())
    }

    fn preferred_height(&self, for_width: Option<f32>) -> SizeRequest {
        let padding = self.style.read().padding;
        let inner_width = for_width.map(|w| (w - padding.horizontal()).max(0.0));

        let mut request = self.text_node.preferred_height(inner_width);
        for icon in self.icons() {
            request = request.max(SizeRequest::fixed(icon.natural_size().height));
        }
        request.expand(padding.vertical())
    }

    fn allocate(&self, rect: Rect) {
        self.base.set_geometry(rect);

        let padding = self.style.read().padding;
        let spacing = self.spacing();
        let avail_h = (rect.height() - padding.vertical()).max(0.0);
        let centered = |height: f32| (padding.top + avail_h / 2.0 - height / 2.0).trunc();

        let mut text_left = padding.left;
        let mut text_right = rect.width() - padding.right;

        if let Some(icon) = self.icon(IconPosition::Primary) {
            let size = icon.natural_size();
            icon.allocate(Rect::new(padding.left, centered(size.height), size.width, size.height));
            text_left += size.width + spacing;
        }

        if let Some(icon) = self.icon(IconPosition::Secondary) {
            let size = icon.natural_size();
            let right = rect.width() - padding.right;
            icon.allocate(Rect::new(right - size.width, centered(size.height), size.width, size.height));
            text_right -= size.width + spacing;
        }

        let text_width = (text_right - text_left).max(0.0);
        let request = self.text_node.preferred_height(Some(text_width));
        let text_height = if request.natural > avail_h {
            avail_h
        } else {
            request.natural.max(request.minimum)
        };

        self.text_node
            .allocate(Rect::new(text_left, centered(text_height), text_width, text_height));
    }

    fn pick(&self, point: Point) -> Option<PickResult> {
        for position in [IconPosition::Primary, IconPosition::Secondary] {
            if let Some(icon) = self.icon(position)
                && icon.widget_base().contains(point)
            {
                return Some(PickResult::Icon(position, icon.object_id()));
            }
        }
        if self.text_node.widget_base().contains(point) {
            return Some(PickResult::Text(self.text_node.object_id()));
        }
        let size = self.base.geometry().size;
        Rect::new(0.0, 0.0, size.width, size.height)
            .contains(point)
            .then(|| PickResult::Entry(self.base.id()))
    }

    // =========================================================================
    // Style
    // =========================================================================

    fn set_pseudo_class(&self, pseudo_class: Option<PseudoClass>) {
        {
            let mut current = self.pseudo_class.write();
            if *current == pseudo_class {
                return;
            }
            tracing::debug!(
                target: targets::ENTRY,
                id = ?self.base.id(),
                from = ?*current,
                to = ?pseudo_class,
                "pseudo-class changed"
            );
            *current = pseudo_class;
        }
        self.style_changed();
    }

    fn compute_style(&self) -> ComputedStyle {
        let name = self.base.name();
        let classes = self.style_classes.read().clone();
        let context = StyleContext {
            name: (!name.is_empty()).then_some(name.as_str()),
            classes: &classes,
            pseudo_class: *self.pseudo_class.read(),
            ..StyleContext::new(Entry::TYPE_NAME)
        };
        let inline = self.inline_style.read();
        let inline = (!inline.is_empty()).then_some(&*inline);
        self.services
            .style
            .compute_style(self.base.id(), &context, inline)
    }

    fn restyle_after_identity_change(&self) {
        self.services.style.invalidate(self.base.id());
        self.style_changed();
    }

    /// Resolve the style and push it into the text node.
    fn style_changed(&self) {
        let style = self.compute_style();

        if let Some(color) = style.color {
            self.text_node.set_color(color);
        }
        self.text_node
            .set_cursor_color(style.extra_color("caret-color").unwrap_or(self.caret_default));
        self.text_node.set_selection_color(
            style
                .extra_color("selection-background-color")
                .unwrap_or(self.selection_default),
        );

        let family = style
            .font_family
            .as_ref()
            .map(|families| families.join(", "))
            .or_else(|| self.font_family_default.clone());
        let size = style.font_size.or(self.font_size_default);
        if let Some(font) = font_name(family.as_deref(), size) {
            self.text_node.set_font_name(font);
        }

        if style.padding != self.style.read().padding {
            self.base.queue_relayout();
        }
        *self.style.write() = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryClipboard, Texture};
    use crate::widget::{FocusInEvent, FocusOutEvent, FocusReason, Key, KeyboardModifiers};
    use crate::widgets::FixedTextMetrics;
    use horizon_entry_core::init_global_registry;

    fn setup() -> (Entry, Arc<MemoryClipboard>) {
        init_global_registry();
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let (services, clipboard) = EntryServices::headless();
        let services = services.with_metrics(Arc::new(FixedTextMetrics::new(100.0, 20.0)));
        services.textures.insert("a.png", Texture::solid(16, 16, [0; 4]).unwrap());
        (Entry::new("", services), clipboard)
    }

    fn focus(entry: &Entry, gained: bool) {
        let mut event = if gained {
            WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Other))
        } else {
            WidgetEvent::FocusOut(FocusOutEvent::new(FocusReason::Other))
        };
        assert!(entry.event(&mut event));
    }

    #[test]
    fn test_construction() {
        let (entry, _) = setup();
        let node = entry.text_node();
        assert!(node.is_editable());
        assert!(node.is_single_line());
        assert!(!node.is_cursor_visible());
        assert!(entry.widget_base().is_reactive());
        assert_eq!(node.widget_base().parent(), Some(entry.object_id()));
        assert_eq!(entry.spacing(), 6.0);
        assert_eq!(node.cursor_color(), Color::from_rgb8(0x00, 0x9c, 0xcf));
    }

    #[test]
    fn test_focus_shows_and_hides_cursor() {
        let (entry, _) = setup();
        focus(&entry, true);
        assert!(entry.has_focus());
        assert!(entry.text_node().is_cursor_visible());
        assert_eq!(entry.pseudo_class(), Some(PseudoClass::Focus));

        focus(&entry, false);
        assert!(!entry.text_node().is_cursor_visible());
        assert_eq!(entry.pseudo_class(), None);
    }

    #[test]
    fn test_hint_replaced_while_visible() {
        let (entry, _) = setup();
        entry.set_hint_text(Some("Search"));
        entry.set_hint_text(Some("Find"));
        assert_eq!(entry.text_node().text(), "Find");
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn test_clearing_visible_hint() {
        let (entry, _) = setup();
        entry.set_hint_text(Some("Search"));
        entry.set_hint_text(None);
        assert!(!entry.is_hint_visible());
        assert_eq!(entry.text_node().text(), "");
        assert_eq!(entry.pseudo_class(), None);
    }

    #[test]
    fn test_hint_not_shown_over_text() {
        let (entry, _) = setup();
        entry.set_text("query");
        entry.set_hint_text(Some("Search"));
        assert!(!entry.is_hint_visible());
        assert_eq!(entry.text(), "query");
    }

    #[test]
    fn test_typing_over_hint_clears_it() {
        let (entry, _) = setup();
        entry.set_hint_text(Some("Search"));
        assert!(entry.event(&mut WidgetEvent::KeyPress(KeyPressEvent::typed('q'))));
        assert!(!entry.is_hint_visible());
        assert_eq!(entry.text(), "q");
    }

    #[test]
    fn test_editing_keys_leave_hint_intact() {
        let (entry, _) = setup();
        entry.set_hint_text(Some("Search"));

        for (key, modifiers) in [
            (Key::Backspace, KeyboardModifiers::NONE),
            (Key::Delete, KeyboardModifiers::NONE),
            (Key::Backspace, KeyboardModifiers::CTRL),
            (Key::A, KeyboardModifiers::CTRL),
            (Key::ArrowLeft, KeyboardModifiers::SHIFT),
        ] {
            let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers, "", false));
            assert!(!entry.event(&mut event), "{key:?}");
            assert!(entry.is_hint_visible());
            assert_eq!(entry.text_node().text(), "Search");
            assert_eq!(entry.hint_text().as_deref(), Some("Search"));
            assert_eq!(entry.text(), "");
        }
        assert!(!entry.text_node().has_selection());
        assert_eq!(entry.pseudo_class(), Some(PseudoClass::Indeterminate));
    }

    #[test]
    fn test_properties_are_distinct() {
        let (entry, _) = setup();
        entry.set_property("hint-text", Some("Search")).unwrap();
        entry.set_property("text", Some("abc")).unwrap();
        assert_eq!(entry.property("text").unwrap().as_deref(), Some("abc"));
        assert_eq!(entry.property("hint-text").unwrap().as_deref(), Some("Search"));
        assert!(matches!(
            entry.property("value"),
            Err(EntryError::UnknownProperty(_))
        ));
    }

    #[test]
    fn test_text_changed_emitted() {
        let (entry, _) = setup();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = seen.clone();
        entry.text_changed().connect(move |text| sink.write().push(text.clone()));
        entry.set_text("a");
        entry.set_text("");
        assert_eq!(*seen.read(), vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_unhandled_keys_propagate() {
        let (entry, clipboard) = setup();
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(
            Key::Q,
            KeyboardModifiers::CTRL,
            "",
            false,
        ));
        assert!(!entry.event(&mut event));
        assert!(!event.is_accepted());
        assert_eq!(clipboard.access_count(), 0);
    }

    #[test]
    fn test_meta_counts_as_primary() {
        let (entry, clipboard) = setup();
        entry.set_text("abc");
        entry.text_node().select_all();
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(
            Key::C,
            KeyboardModifiers::META,
            "",
            false,
        ));
        assert!(entry.event(&mut event));
        assert_eq!(clipboard.contents().as_deref(), Some("abc"));
    }

    #[test]
    fn test_copy_ignores_hint() {
        let (entry, clipboard) = setup();
        entry.set_hint_text(Some("Search"));
        entry.text_node().select_all();
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(
            Key::C,
            KeyboardModifiers::CTRL,
            "",
            false,
        ));
        assert!(entry.event(&mut event));
        assert_eq!(clipboard.access_count(), 0);
    }

    #[test]
    fn test_missing_icon_leaves_slot_empty() {
        let (entry, _) = setup();
        entry.set_primary_icon_from_file(Some("a.png"));
        assert!(entry.primary_icon().is_some());

        entry.set_primary_icon_from_file(Some("/nonexistent/b.png"));
        assert!(entry.primary_icon().is_none());
        assert_eq!(entry.widget_base().children(), vec![entry.focus_target()]);
    }

    #[test]
    fn test_icon_change_queues_relayout() {
        let (entry, _) = setup();
        entry.allocate(Rect::new(0.0, 0.0, 200.0, 30.0));
        assert!(!entry.widget_base().needs_relayout());
        entry.set_secondary_icon_from_file(Some("a.png"));
        assert!(entry.widget_base().needs_relayout());
    }

    #[test]
    fn test_pick() {
        let (entry, _) = setup();
        entry.set_primary_icon_from_file(Some("a.png"));
        entry.allocate(Rect::new(0.0, 0.0, 200.0, 30.0));

        let icon_id = entry.primary_icon().map(|icon| icon.object_id());
        assert_eq!(
            entry.pick(Point::new(4.0, 10.0)),
            icon_id.map(|id| PickResult::Icon(IconPosition::Primary, id))
        );
        assert_eq!(
            entry.pick(Point::new(100.0, 10.0)),
            Some(PickResult::Text(entry.focus_target()))
        );
        assert_eq!(
            entry.pick(Point::new(18.0, 10.0)),
            Some(PickResult::Entry(entry.object_id()))
        );
        assert_eq!(entry.pick(Point::new(300.0, 10.0)), None);
    }

    #[test]
    fn test_destroyed_entry_is_a_no_op() {
        let (entry, _) = setup();
        entry.set_text("abc");
        init_global_registry().destroy(entry.object_id()).unwrap();

        assert_eq!(entry.text(), "");
        entry.set_text("ignored");
        assert_eq!(entry.text_node().text(), "abc");
        assert_eq!(entry.hint_text(), None);
        assert!(!entry.event(&mut WidgetEvent::KeyPress(KeyPressEvent::typed('x'))));
    }
}
