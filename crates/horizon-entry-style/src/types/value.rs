//! Style property value types.
//!
//! # Example
//!
//! ```
//! use horizon_entry_style::prelude::*;
//!
//! let px = LengthValue::px(16.0);
//! let em = LengthValue::em(1.5);
//!
//! // font size 14, root font size 16
//! assert_eq!(px.to_px(14.0, 16.0), 16.0);
//! assert_eq!(em.to_px(14.0, 16.0), 21.0);
//! ```

use horizon_entry_core::Color;

/// A style property value with CSS-like special values for inheritance.
///
/// # Example
///
/// ```
/// use horizon_entry_style::prelude::StyleValue;
///
/// let inherited: StyleValue<i32> = StyleValue::Inherit;
/// assert_eq!(inherited.resolve(Some(&42), &0), 42);
///
/// let initial: StyleValue<i32> = StyleValue::Initial;
/// assert_eq!(initial.resolve(Some(&42), &0), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue<T> {
    /// An explicit value.
    Set(T),
    /// Inherit from parent (explicit opt-in).
    Inherit,
    /// Use the initial/default value.
    Initial,
    /// Unset - acts as Inherit for inherited properties, Initial otherwise.
    Unset,
}

impl<T> Default for StyleValue<T> {
    fn default() -> Self {
        Self::Initial
    }
}

impl<T: Clone> StyleValue<T> {
    /// Resolve the value given inherited and initial values.
    pub fn resolve(&self, inherited: Option<&T>, initial: &T) -> T {
        match self {
            StyleValue::Set(v) => v.clone(),
            StyleValue::Inherit | StyleValue::Unset => {
                inherited.cloned().unwrap_or_else(|| initial.clone())
            }
            StyleValue::Initial => initial.clone(),
        }
    }

    /// Resolve without an initial value; `None` means "not specified".
    pub fn resolve_opt(&self, inherited: Option<&T>) -> Option<T> {
        match self {
            StyleValue::Set(v) => Some(v.clone()),
            StyleValue::Inherit | StyleValue::Unset => inherited.cloned(),
            StyleValue::Initial => None,
        }
    }

    /// Check if this value is explicitly set.
    pub fn is_set(&self) -> bool {
        matches!(self, StyleValue::Set(_))
    }

    /// Whether a rule specified anything at all (including keywords).
    ///
    /// `Initial` doubles as "absent", so it never overrides in the cascade.
    pub fn is_specified(&self) -> bool {
        !matches!(self, StyleValue::Initial)
    }

    /// Get the inner value if set.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            StyleValue::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for StyleValue<T> {
    fn from(value: T) -> Self {
        StyleValue::Set(value)
    }
}

/// CSS-like length values with various units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LengthValue {
    /// Absolute pixels.
    Px(f32),
    /// Relative to current font size.
    Em(f32),
    /// Relative to root font size.
    Rem(f32),
    /// Automatic sizing; resolves to zero for padding.
    #[default]
    Auto,
    /// Zero length.
    Zero,
}

impl LengthValue {
    /// Create a pixel value.
    pub fn px(value: f32) -> Self {
        Self::Px(value)
    }

    /// Create an em value.
    pub fn em(value: f32) -> Self {
        Self::Em(value)
    }

    /// Create a rem value.
    pub fn rem(value: f32) -> Self {
        Self::Rem(value)
    }

    /// Resolve to pixels given the current and root font sizes.
    pub fn to_px(&self, font_size: f32, root_font_size: f32) -> f32 {
        match self {
            LengthValue::Px(v) => *v,
            LengthValue::Em(v) => v * font_size,
            LengthValue::Rem(v) => v * root_font_size,
            LengthValue::Auto | LengthValue::Zero => 0.0,
        }
    }
}

/// Edge values for padding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeValues {
    pub top: LengthValue,
    pub right: LengthValue,
    pub bottom: LengthValue,
    pub left: LengthValue,
}

impl EdgeValues {
    /// Create uniform edge values.
    pub fn uniform(value: LengthValue) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create symmetric edge values (vertical, horizontal).
    pub fn symmetric(vertical: LengthValue, horizontal: LengthValue) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    /// Create from 4 values (top, right, bottom, left).
    pub fn new(top: LengthValue, right: LengthValue, bottom: LengthValue, left: LengthValue) -> Self {
        Self { top, right, bottom, left }
    }

    /// Create zero edge values.
    pub fn zero() -> Self {
        Self::uniform(LengthValue::Zero)
    }

    /// Resolve all edges to pixels.
    pub fn to_px(&self, font_size: f32, root_font_size: f32) -> ResolvedEdges {
        ResolvedEdges {
            top: self.top.to_px(font_size, root_font_size),
            right: self.right.to_px(font_size, root_font_size),
            bottom: self.bottom.to_px(font_size, root_font_size),
            left: self.left.to_px(font_size, root_font_size),
        }
    }
}

/// Resolved edge values in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedEdges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl ResolvedEdges {
    /// Same padding on every side.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Get total horizontal space (left + right).
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Get total vertical space (top + bottom).
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// The kind of value a named style property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    Length,
    Number,
    Ident,
    String,
    FontFamily,
    Edges,
}

/// A dynamically typed style property value, used for get/set by name.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Color(Color),
    Length(LengthValue),
    Number(f32),
    Ident(String),
    String(String),
    FontFamily(Vec<String>),
    Edges(ResolvedEdges),
}

impl PropertyValue {
    /// The kind of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Length(_) => PropertyKind::Length,
            PropertyValue::Number(_) => PropertyKind::Number,
            PropertyValue::Ident(_) => PropertyKind::Ident,
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::FontFamily(_) => PropertyKind::FontFamily,
            PropertyValue::Edges(_) => PropertyKind::Edges,
        }
    }

    /// Get the color, if this is one.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Get a pixel size from a length or a bare number.
    pub fn as_px(&self, font_size: f32, root_font_size: f32) -> Option<f32> {
        match self {
            PropertyValue::Length(l) => Some(l.to_px(font_size, root_font_size)),
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text of an identifier or string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Ident(s) | PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value can be stored in a property of `kind`.
    ///
    /// Bare numbers are accepted as pixel lengths, and a single identifier
    /// or string is accepted as a font family.
    pub fn fits(&self, kind: PropertyKind) -> bool {
        match (self, kind) {
            (PropertyValue::Number(_), PropertyKind::Length) => true,
            (PropertyValue::Ident(_) | PropertyValue::String(_), PropertyKind::FontFamily) => true,
            (value, kind) => value.kind() == kind,
        }
    }
}

impl From<Color> for PropertyValue {
    fn from(color: Color) -> Self {
        PropertyValue::Color(color)
    }
}

impl From<LengthValue> for PropertyValue {
    fn from(length: LengthValue) -> Self {
        PropertyValue::Length(length)
    }
}
