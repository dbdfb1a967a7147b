//! Platform services injected into widgets: the clipboard and the texture
//! cache.

pub mod clipboard;
pub mod texture_cache;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, TextCallback};
pub use texture_cache::{Texture, TextureCache, TextureCacheStats, TextureError};
