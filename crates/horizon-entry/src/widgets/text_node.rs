//! The editable text node embedded in an entry.
//!
//! `TextNode` stores the characters, the cursor and the selection, and
//! handles ordinary editing keys. Positions are byte offsets into the UTF-8
//! text and always sit on grapheme boundaries.
//!
//! Clipboard chords, Enter, Tab and Escape are left unconsumed so the
//! enclosing widget can act on them.
//!
//! # Example
//!
//! ```
//! use horizon_entry::widgets::TextNode;
//!
//! let node = TextNode::new("Hello World");
//! node.set_selection(0, 5);
//! assert_eq!(node.selected_text(), "Hello");
//!
//! node.delete_selection();
//! assert_eq!(node.text(), " World");
//! assert_eq!(node.cursor_position(), 0);
//! ```

use std::sync::Arc;

use horizon_entry_core::{Color, Object, ObjectId, Rect, Signal};
use parking_lot::RwLock;
use unicode_segmentation::UnicodeSegmentation;

use crate::widget::{Key, KeyPressEvent, SizeRequest, Widget, WidgetBase, WidgetEvent};

/// Measures text for layout.
pub trait TextMetrics: Send + Sync {
    /// Width request for `text` drawn in `font_name`.
    fn preferred_width(&self, text: &str, font_name: &str) -> SizeRequest;

    /// Height request for one line in `font_name`.
    fn preferred_height(&self, font_name: &str) -> SizeRequest;
}

/// Metrics that report the same size for any text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTextMetrics {
    pub width: SizeRequest,
    pub height: SizeRequest,
}

impl FixedTextMetrics {
    /// Natural size `width` x `height`, with no minimum width.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: SizeRequest::new(0.0, width),
            height: SizeRequest::fixed(height),
        }
    }
}

impl TextMetrics for FixedTextMetrics {
    fn preferred_width(&self, _text: &str, _font_name: &str) -> SizeRequest {
        self.width
    }

    fn preferred_height(&self, _font_name: &str) -> SizeRequest {
        self.height
    }
}

/// Metrics estimated from the font size, assuming an average advance.
///
/// The size is read from a trailing `Npx` in the font name; other names use
/// [`AverageAdvanceMetrics::DEFAULT_FONT_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AverageAdvanceMetrics;

impl AverageAdvanceMetrics {
    pub const DEFAULT_FONT_SIZE: f32 = 13.0;
    const ADVANCE: f32 = 0.6;
    const LINE_HEIGHT: f32 = 1.25;
    const CURSOR_WIDTH: f32 = 2.0;

    fn font_size(font_name: &str) -> f32 {
        font_name
            .rsplit(' ')
            .next()
            .and_then(|last| last.strip_suffix("px"))
            .and_then(|size| size.parse::<f32>().ok())
            .filter(|size| *size > 0.0)
            .unwrap_or(Self::DEFAULT_FONT_SIZE)
    }
}

impl TextMetrics for AverageAdvanceMetrics {
    fn preferred_width(&self, text: &str, font_name: &str) -> SizeRequest {
        let graphemes = text.graphemes(true).count() as f32;
        let advance = Self::font_size(font_name) * Self::ADVANCE;
        SizeRequest::new(Self::CURSOR_WIDTH, graphemes * advance + Self::CURSOR_WIDTH)
    }

    fn preferred_height(&self, font_name: &str) -> SizeRequest {
        SizeRequest::fixed((Self::font_size(font_name) * Self::LINE_HEIGHT).ceil())
    }
}

/// Editable state, kept apart from the node so edits run under one lock.
#[derive(Debug, Clone)]
struct TextState {
    text: String,
    cursor_pos: usize,
    selection_anchor: Option<usize>,
    editable: bool,
    single_line: bool,
    cursor_visible: bool,
    color: Color,
    cursor_color: Color,
    selection_color: Color,
    font_name: String,
}

impl TextState {
    fn new(text: String) -> Self {
        let cursor_pos = text.len();
        Self {
            text,
            cursor_pos,
            selection_anchor: None,
            editable: true,
            single_line: true,
            cursor_visible: false,
            color: Color::BLACK,
            cursor_color: Color::BLACK,
            selection_color: Color::from_rgb8(0x00, 0x9c, 0xcf),
            font_name: String::new(),
        }
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        let range = (anchor.min(self.cursor_pos), anchor.max(self.cursor_pos));
        (range.0 != range.1).then_some(range)
    }

    fn selected_text(&self) -> &str {
        self.selection_range()
            .map_or("", |(start, end)| &self.text[start..end])
    }

    fn set_text(&mut self, text: String) -> bool {
        let text = self.sanitize(&text);
        self.cursor_pos = text.len();
        self.selection_anchor = None;
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    fn sanitize(&self, text: &str) -> String {
        if self.single_line {
            text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
        } else {
            text.to_string()
        }
    }

    fn insert_text(&mut self, text: &str) -> bool {
        let text = self.sanitize(text);
        self.selection_anchor = None;
        if text.is_empty() {
            return false;
        }
        self.text.insert_str(self.cursor_pos, &text);
        self.cursor_pos += text.len();
        true
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection_anchor = None;
            return false;
        };
        self.text.replace_range(start..end, "");
        self.cursor_pos = start;
        self.selection_anchor = None;
        true
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.text.replace_range(start..end, "");
        self.cursor_pos = start;
        true
    }

    fn delete_before(&mut self, word: bool) -> bool {
        if self.delete_selection() {
            return true;
        }
        let start = if word {
            self.word_boundary_before(self.cursor_pos)
        } else {
            self.prev_grapheme_boundary(self.cursor_pos)
        };
        self.delete_range(start, self.cursor_pos)
    }

    fn delete_after(&mut self, word: bool) -> bool {
        if self.delete_selection() {
            return true;
        }
        let end = if word {
            self.word_boundary_after(self.cursor_pos)
        } else {
            self.next_grapheme_boundary(self.cursor_pos)
        };
        self.delete_range(self.cursor_pos, end)
    }

    /// Move the cursor to `target`, extending or dropping the selection.
    fn move_to(&mut self, target: usize, extend_selection: bool) {
        if extend_selection {
            self.selection_anchor.get_or_insert(self.cursor_pos);
        } else {
            self.selection_anchor = None;
        }
        self.cursor_pos = target;
    }

    fn move_left(&mut self, word: bool, extend_selection: bool) {
        if !extend_selection && let Some((start, _)) = self.selection_range() {
            self.move_to(start, false);
            return;
        }
        let target = if word {
            self.word_boundary_before(self.cursor_pos)
        } else {
            self.prev_grapheme_boundary(self.cursor_pos)
        };
        self.move_to(target, extend_selection);
    }

    fn move_right(&mut self, word: bool, extend_selection: bool) {
        if !extend_selection && let Some((_, end)) = self.selection_range() {
            self.move_to(end, false);
            return;
        }
        let target = if word {
            self.word_boundary_after(self.cursor_pos)
        } else {
            self.next_grapheme_boundary(self.cursor_pos)
        };
        self.move_to(target, extend_selection);
    }

    fn prev_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .take_while(|offset| *offset < pos)
            .last()
            .unwrap_or(0)
    }

    fn next_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .find(|end| *end > pos)
            .unwrap_or(self.text.len())
    }

    fn snap_to_grapheme_boundary(&self, pos: usize) -> usize {
        if pos >= self.text.len() {
            return self.text.len();
        }
        let start = self.prev_grapheme_boundary(pos + 1);
        let end = self.next_grapheme_boundary(start);
        if pos - start <= end - pos { start } else { end }
    }

    /// Start of the word before `pos`, skipping separators first.
    fn word_boundary_before(&self, pos: usize) -> usize {
        self.text[..pos]
            .char_indices()
            .rev()
            .skip_while(|(_, c)| !c.is_alphanumeric())
            .take_while(|(_, c)| c.is_alphanumeric())
            .last()
            .map_or(0, |(offset, _)| offset)
    }

    /// Start of the next word after `pos`, or the end of the text.
    fn word_boundary_after(&self, pos: usize) -> usize {
        let rest = &self.text[pos..];
        let offset = rest
            .char_indices()
            .skip_while(|(_, c)| c.is_alphanumeric())
            .find(|(_, c)| c.is_alphanumeric())
            .map_or(rest.len(), |(offset, _)| offset);
        pos + offset
    }
}

/// Single-line editable text with a cursor and selection.
pub struct TextNode {
    base: WidgetBase,
    state: RwLock<TextState>,
    metrics: Arc<dyn TextMetrics>,
    /// Emitted when Enter is pressed.
    pub activate: Signal<()>,
    /// Emitted with the new text whenever the content changes.
    pub text_changed: Signal<String>,
}

impl TextNode {
    /// A node showing `text`, measured with [`AverageAdvanceMetrics`].
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_metrics(text, Arc::new(AverageAdvanceMetrics))
    }

    /// A node showing `text`, measured with `metrics`.
    ///
    /// The node starts editable, reactive and single-line, with its cursor
    /// hidden.
    pub fn with_metrics(text: impl Into<String>, metrics: Arc<dyn TextMetrics>) -> Self {
        let node = Self {
            base: WidgetBase::new::<Self>(),
            state: RwLock::new(TextState::new(String::new())),
            metrics,
            activate: Signal::new(),
            text_changed: Signal::new(),
        };
        node.state.write().set_text(text.into());
        node.base.set_reactive(true);
        node
    }

    /// Run an edit under the lock, then notify if the text changed.
    fn edit(&self, f: impl FnOnce(&mut TextState) -> bool) -> bool {
        let changed_text = {
            let mut state = self.state.write();
            f(&mut state).then(|| state.text.clone())
        };
        match changed_text {
            Some(text) => {
                self.base.queue_relayout();
                self.text_changed.emit(text);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    /// Replace the text. The cursor moves to the end and the selection is
    /// dropped.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.edit(|state| state.set_text(text));
    }

    /// Whether the node holds no text.
    pub fn is_empty(&self) -> bool {
        self.state.read().text.is_empty()
    }

    /// Insert `text` at the cursor, leaving the cursor after it.
    ///
    /// Any selection is dropped, not replaced. Line breaks are removed in
    /// single-line mode.
    pub fn insert_text(&self, text: &str) -> bool {
        self.edit(|state| state.insert_text(text))
    }

    /// Delete the selected text. Returns `false` if nothing was selected.
    pub fn delete_selection(&self) -> bool {
        self.edit(TextState::delete_selection)
    }

    // =========================================================================
    // Cursor and selection
    // =========================================================================

    /// Cursor position as a byte offset.
    pub fn cursor_position(&self) -> usize {
        self.state.read().cursor_pos
    }

    /// Move the cursor, snapping to the nearest grapheme boundary. Drops the
    /// selection.
    pub fn set_cursor_position(&self, pos: usize) {
        let mut state = self.state.write();
        let pos = state.snap_to_grapheme_boundary(pos);
        state.move_to(pos, false);
    }

    /// Select from `start` to `end`; the cursor ends up at `end`.
    pub fn set_selection(&self, start: usize, end: usize) {
        let mut state = self.state.write();
        let start = state.snap_to_grapheme_boundary(start);
        let end = state.snap_to_grapheme_boundary(end);
        state.selection_anchor = Some(start);
        state.cursor_pos = end;
    }

    /// The selected byte range, ordered, if non-empty.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.state.read().selection_range()
    }

    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    /// The selected text, or an empty string.
    pub fn selected_text(&self) -> String {
        self.state.read().selected_text().to_string()
    }

    pub fn select_all(&self) {
        let mut state = self.state.write();
        state.selection_anchor = Some(0);
        state.cursor_pos = state.text.len();
    }

    pub fn deselect(&self) {
        self.state.write().selection_anchor = None;
    }

    // =========================================================================
    // Flags and appearance
    // =========================================================================

    pub fn is_editable(&self) -> bool {
        self.state.read().editable
    }

    pub fn set_editable(&self, editable: bool) {
        self.state.write().editable = editable;
    }

    pub fn is_single_line(&self) -> bool {
        self.state.read().single_line
    }

    pub fn set_single_line(&self, single_line: bool) {
        self.state.write().single_line = single_line;
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.state.read().cursor_visible
    }

    pub fn set_cursor_visible(&self, visible: bool) {
        self.state.write().cursor_visible = visible;
    }

    pub fn color(&self) -> Color {
        self.state.read().color
    }

    pub fn set_color(&self, color: Color) {
        self.state.write().color = color;
    }

    pub fn cursor_color(&self) -> Color {
        self.state.read().cursor_color
    }

    pub fn set_cursor_color(&self, color: Color) {
        self.state.write().cursor_color = color;
    }

    pub fn selection_color(&self) -> Color {
        self.state.read().selection_color
    }

    pub fn set_selection_color(&self, color: Color) {
        self.state.write().selection_color = color;
    }

    /// Font description, such as `"Sans 12px"`. Empty means the default font.
    pub fn font_name(&self) -> String {
        self.state.read().font_name.clone()
    }

    pub fn set_font_name(&self, font_name: impl Into<String>) {
        let font_name = font_name.into();
        let mut state = self.state.write();
        if state.font_name != font_name {
            state.font_name = font_name;
            drop(state);
            self.base.queue_relayout();
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn handle_key_press(&self, event: &KeyPressEvent) -> bool {
        if !self.is_editable() {
            return false;
        }

        let shift = event.modifiers.shift;
        let word = event.modifiers.primary();

        match event.key {
            Key::ArrowLeft => {
                self.state.write().move_left(word, shift);
                true
            }
            Key::ArrowRight => {
                self.state.write().move_right(word, shift);
                true
            }
            Key::Home => {
                self.state.write().move_to(0, shift);
                true
            }
            Key::End => {
                let mut state = self.state.write();
                let end = state.text.len();
                state.move_to(end, shift);
                true
            }
            Key::Backspace => {
                self.edit(|state| state.delete_before(word));
                true
            }
            Key::Delete => {
                self.edit(|state| state.delete_after(word));
                true
            }
            Key::Enter => {
                self.activate.emit(());
                false
            }
            Key::Tab | Key::Escape => false,
            Key::A if word && !event.modifiers.alt => {
                self.select_all();
                true
            }
            _ => {
                let printable = !event.text.is_empty() && !event.text.chars().any(char::is_control);
                if printable && !word && !event.modifiers.alt {
                    let text = event.text.clone();
                    self.edit(|state| {
                        state.delete_selection();
                        state.insert_text(&text)
                    });
                    true
                } else {
                    false
                }
            }
        }
    }
}

impl Object for TextNode {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Widget for TextNode {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn preferred_width(&self, _for_height: Option<f32>) -> SizeRequest {
        let state = self.state.read();
        self.metrics.preferred_width(&state.text, &state.font_name)
    }

    fn preferred_height(&self, _for_width: Option<f32>) -> SizeRequest {
        self.metrics.preferred_height(&self.state.read().font_name)
    }

    fn allocate(&self, rect: Rect) {
        self.base.set_geometry(rect);
    }

    fn event(&self, event: &mut WidgetEvent) -> bool {
        let consumed = match event {
            WidgetEvent::KeyPress(key) => self.handle_key_press(key),
            _ => false,
        };
        if consumed {
            event.accept();
        }
        consumed
    }
}

impl std::fmt::Debug for TextNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("TextNode")
            .field("id", &self.base.id())
            .field("text", &state.text)
            .field("cursor_pos", &state.cursor_pos)
            .field("selection_anchor", &state.selection_anchor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::KeyboardModifiers;
    use horizon_entry_core::init_global_registry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() {
        init_global_registry();
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn key(node: &TextNode, key: Key, modifiers: KeyboardModifiers) -> bool {
        node.event(&mut WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers, "", false)))
    }

    fn typed(node: &TextNode, c: char) -> bool {
        node.event(&mut WidgetEvent::KeyPress(KeyPressEvent::typed(c)))
    }

    #[test]
    fn test_text_node_creation() {
        setup();
        let node = TextNode::new("abc");
        assert_eq!(node.text(), "abc");
        assert_eq!(node.cursor_position(), 3);
        assert!(node.is_editable());
        assert!(node.is_single_line());
        assert!(!node.is_cursor_visible());
        assert!(node.widget_base().is_reactive());
    }

    #[test]
    fn test_typing_replaces_selection() {
        setup();
        let node = TextNode::new("hello");
        node.set_selection(1, 4);
        assert!(typed(&node, 'a'));
        assert_eq!(node.text(), "hao");
        assert_eq!(node.cursor_position(), 2);
    }

    #[test]
    fn test_cursor_movement() {
        setup();
        let node = TextNode::new("Hello");
        key(&node, Key::Home, KeyboardModifiers::NONE);
        assert_eq!(node.cursor_position(), 0);

        key(&node, Key::ArrowRight, KeyboardModifiers::NONE);
        assert_eq!(node.cursor_position(), 1);

        key(&node, Key::End, KeyboardModifiers::NONE);
        assert_eq!(node.cursor_position(), 5);

        key(&node, Key::ArrowLeft, KeyboardModifiers::NONE);
        assert_eq!(node.cursor_position(), 4);
    }

    #[test]
    fn test_selection_with_shift() {
        setup();
        let node = TextNode::new("Hello");
        node.set_cursor_position(0);
        key(&node, Key::ArrowRight, KeyboardModifiers::SHIFT);
        key(&node, Key::ArrowRight, KeyboardModifiers::SHIFT);
        assert_eq!(node.selection_range(), Some((0, 2)));
        assert_eq!(node.selected_text(), "He");

        // Moving without shift collapses to the selection edge.
        key(&node, Key::ArrowLeft, KeyboardModifiers::NONE);
        assert!(!node.has_selection());
        assert_eq!(node.cursor_position(), 0);
    }

    #[test]
    fn test_backspace_and_delete() {
        setup();
        let node = TextNode::new("Hello");
        key(&node, Key::Backspace, KeyboardModifiers::NONE);
        assert_eq!(node.text(), "Hell");

        node.set_cursor_position(0);
        key(&node, Key::Delete, KeyboardModifiers::NONE);
        assert_eq!(node.text(), "ell");
        assert_eq!(node.cursor_position(), 0);
    }

    #[test]
    fn test_word_editing() {
        setup();
        let node = TextNode::new("Hello World");
        key(&node, Key::Backspace, KeyboardModifiers::CTRL);
        assert_eq!(node.text(), "Hello ");

        node.set_text("one two three");
        node.set_cursor_position(0);
        key(&node, Key::ArrowRight, KeyboardModifiers::CTRL);
        assert_eq!(node.cursor_position(), 4);
        key(&node, Key::Delete, KeyboardModifiers::CTRL);
        assert_eq!(node.text(), "one three");
    }

    #[test]
    fn test_grapheme_boundaries() {
        setup();
        // "e" + combining acute accent is one grapheme of three bytes.
        let node = TextNode::new("ae\u{301}b");
        node.set_cursor_position(1);
        key(&node, Key::ArrowRight, KeyboardModifiers::NONE);
        assert_eq!(node.cursor_position(), 4);

        key(&node, Key::Backspace, KeyboardModifiers::NONE);
        assert_eq!(node.text(), "ab");

        // Positions inside a grapheme snap to a boundary.
        node.set_text("e\u{301}");
        node.set_cursor_position(1);
        assert_eq!(node.cursor_position(), 0);
    }

    #[test]
    fn test_select_all() {
        setup();
        let node = TextNode::new("abc");
        assert!(key(&node, Key::A, KeyboardModifiers::CTRL));
        assert_eq!(node.selected_text(), "abc");
    }

    #[test]
    fn test_clipboard_chords_pass_through() {
        setup();
        let node = TextNode::new("abc");
        for letter in [Key::C, Key::X, Key::V] {
            let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(
                letter,
                KeyboardModifiers::CTRL,
                "",
                false,
            ));
            assert!(!node.event(&mut event));
            assert!(!event.is_accepted());
        }
        assert_eq!(node.text(), "abc");
    }

    #[test]
    fn test_enter_activates_without_consuming() {
        setup();
        let node = TextNode::new("abc");
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        node.activate.connect(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!key(&node, Key::Enter, KeyboardModifiers::NONE));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!key(&node, Key::Tab, KeyboardModifiers::NONE));
        assert!(!key(&node, Key::Escape, KeyboardModifiers::NONE));
    }

    #[test]
    fn test_read_only_ignores_keys() {
        setup();
        let node = TextNode::new("abc");
        node.set_editable(false);
        assert!(!typed(&node, 'x'));
        assert!(!key(&node, Key::Backspace, KeyboardModifiers::NONE));
        assert_eq!(node.text(), "abc");
    }

    #[test]
    fn test_single_line_drops_line_breaks() {
        setup();
        let node = TextNode::new("one\ntwo");
        assert_eq!(node.text(), "onetwo");
        node.insert_text("\r\n!");
        assert_eq!(node.text(), "onetwo!");
    }

    #[test]
    fn test_text_changed_signal() {
        setup();
        let node = TextNode::new("");
        let last = Arc::new(RwLock::new(String::new()));
        let sink = last.clone();
        node.text_changed.connect(move |text| *sink.write() = text.clone());

        typed(&node, 'h');
        typed(&node, 'i');
        assert_eq!(*last.read(), "hi");

        // Setting identical text is not a change.
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        node.text_changed.connect(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        node.set_text("hi");
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_metrics() {
        setup();
        let node = TextNode::with_metrics("abc", Arc::new(FixedTextMetrics::new(100.0, 20.0)));
        assert_eq!(node.preferred_width(None), SizeRequest::new(0.0, 100.0));
        assert_eq!(node.preferred_height(None), SizeRequest::fixed(20.0));

        assert_eq!(AverageAdvanceMetrics::font_size("Sans 20px"), 20.0);
        assert_eq!(AverageAdvanceMetrics::font_size("Sans"), 13.0);
        let estimate = AverageAdvanceMetrics.preferred_height("10px");
        assert_eq!(estimate.natural, 13.0);
    }
}
