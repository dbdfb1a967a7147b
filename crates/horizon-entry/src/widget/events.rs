//! Widget event types.
//!
//! Events are delivered to [`Widget::event`](super::Widget::event) as a
//! [`WidgetEvent`]. The return value says whether the widget consumed the
//! event; the event's own accepted flag mirrors it for callers that keep the
//! event around.

use horizon_entry_core::{ObjectId, Point};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// The platform shortcut modifier: Control, or Meta (Cmd on macOS).
    pub fn primary(&self) -> bool {
        self.control || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Common data for all widget events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            modifiers,
        }
    }
}

/// Mouse release event.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    /// Create a new mouse release event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            modifiers,
        }
    }
}

/// Pointer crossing event, sent when the pointer enters an actor.
///
/// `source` is the actor that was entered; `related` is the actor the
/// pointer came from, if any.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// The actor the pointer entered.
    pub source: ObjectId,
    /// The actor the pointer came from.
    pub related: Option<ObjectId>,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(source: ObjectId, related: Option<ObjectId>) -> Self {
        Self {
            base: EventBase::new(),
            source,
            related,
        }
    }
}

/// Pointer crossing event, sent when the pointer leaves an actor.
///
/// `related` is the actor the pointer moved to, if any.
#[derive(Debug, Clone, Copy)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
    /// The actor the pointer left.
    pub source: ObjectId,
    /// The actor the pointer moved to.
    pub related: Option<ObjectId>,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new(source: ObjectId, related: Option<ObjectId>) -> Self {
        Self {
            base: EventBase::new(),
            source,
            related,
        }
    }
}

/// Focus in event, sent when the widget gains keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was gained.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Focus out event, sent when the widget loses keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was lost.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Reason for focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to mouse click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Keyboard key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab,

    // Whitespace
    Space,

    // Control
    Escape,

    // Unknown/unmapped key
    Unknown(u16),
}

const LETTER_KEYS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const DIGIT_KEYS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// Check if this is a letter key.
    pub fn is_letter(&self) -> bool {
        LETTER_KEYS.contains(self)
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight | Key::Home | Key::End
        )
    }

    /// Convert this key to a lowercase ASCII character, if it is a letter or digit.
    pub fn to_ascii_char(&self) -> Option<char> {
        if let Some(i) = LETTER_KEYS.iter().position(|k| k == self) {
            return Some((b'a' + i as u8) as char);
        }
        DIGIT_KEYS
            .iter()
            .position(|k| k == self)
            .map(|i| (b'0' + i as u8) as char)
    }

    /// The key for an ASCII letter (either case) or digit.
    pub fn from_ascii_char(c: char) -> Option<Key> {
        match c {
            'a'..='z' | 'A'..='Z' => {
                Some(LETTER_KEYS[(c.to_ascii_lowercase() as u8 - b'a') as usize])
            }
            '0'..='9' => Some(DIGIT_KEYS[(c as u8 - b'0') as usize]),
            ' ' => Some(Key::Space),
            _ => None,
        }
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (empty for non-printable keys).
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>, is_repeat: bool) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// A press of a printable character with no modifiers.
    pub fn typed(c: char) -> Self {
        let key = Key::from_ascii_char(c).unwrap_or(Key::Unknown(0));
        Self::new(key, KeyboardModifiers::NONE, c.to_string(), false)
    }

    /// The letter this press names, lowercased.
    ///
    /// Uses the key code when it is a letter, otherwise the produced text.
    pub fn letter(&self) -> Option<char> {
        self.key
            .to_ascii_char()
            .filter(char::is_ascii_alphabetic)
            .or_else(|| {
                let mut chars = self.text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
                    _ => None,
                }
            })
    }
}

/// Events delivered to widgets.
#[derive(Debug)]
pub enum WidgetEvent {
    /// Mouse press event.
    MousePress(MousePressEvent),
    /// Mouse release event.
    MouseRelease(MouseReleaseEvent),
    /// Pointer enter event.
    Enter(EnterEvent),
    /// Pointer leave event.
    Leave(LeaveEvent),
    /// Focus in event.
    FocusIn(FocusInEvent),
    /// Focus out event.
    FocusOut(FocusOutEvent),
    /// Key press event.
    KeyPress(KeyPressEvent),
}

impl WidgetEvent {
    fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
            Self::FocusIn(e) => &e.base,
            Self::FocusOut(e) => &e.base,
            Self::KeyPress(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
            Self::FocusIn(e) => &mut e.base,
            Self::FocusOut(e) => &mut e.base,
            Self::KeyPress(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }

    /// Check if this event should propagate to parent widgets.
    ///
    /// Input events propagate while not accepted; crossing and focus events
    /// concern one widget only.
    pub fn should_propagate(&self) -> bool {
        match self {
            Self::MousePress(_) | Self::MouseRelease(_) | Self::KeyPress(_) => !self.is_accepted(),
            Self::Enter(_) | Self::Leave(_) | Self::FocusIn(_) | Self::FocusOut(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_chars_round_trip() {
        assert_eq!(Key::V.to_ascii_char(), Some('v'));
        assert_eq!(Key::Digit7.to_ascii_char(), Some('7'));
        assert_eq!(Key::from_ascii_char('X'), Some(Key::X));
        assert_eq!(Key::Enter.to_ascii_char(), None);
    }

    #[test]
    fn letter_falls_back_to_text() {
        let event = KeyPressEvent::new(Key::Unknown(42), KeyboardModifiers::CTRL, "C", false);
        assert_eq!(event.letter(), Some('c'));

        let digit = KeyPressEvent::new(Key::Digit1, KeyboardModifiers::CTRL, "1", false);
        assert_eq!(digit.letter(), None);
    }

    #[test]
    fn primary_modifier() {
        assert!(KeyboardModifiers::CTRL.primary());
        assert!(KeyboardModifiers::META.primary());
        assert!(!KeyboardModifiers::SHIFT.primary());
    }

    #[test]
    fn accept_and_propagate() {
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::typed('a'));
        assert!(event.should_propagate());
        event.accept();
        assert!(event.is_accepted());
        assert!(!event.should_propagate());
        event.ignore();
        assert!(!event.is_accepted());
    }
}
