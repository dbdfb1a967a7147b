//! Style property sets: as written in rules, and as resolved for a widget.

mod computed;
mod properties;

pub use computed::ComputedStyle;
pub use properties::StyleProperties;
