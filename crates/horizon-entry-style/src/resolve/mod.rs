//! Style resolution: matching, cascading, inheritance and caching.

mod cache;
mod cascade;
mod engine;
mod inheritance;

pub use cache::{StyleCache, StyleCacheKey};
pub use cascade::cascade_properties;
pub use engine::{StyleContext, StyleEngine, StyleResolver};
pub use inheritance::resolve_properties;
