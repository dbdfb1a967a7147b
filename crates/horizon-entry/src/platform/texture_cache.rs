//! Shared cache of decoded icon images.
//!
//! Textures are decoded once per path with the `image` crate and handed out
//! as `Arc` handles. Widgets hold the handles; the cache keeps its own
//! reference, so repeated lookups of the same file are cheap.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_entry_core::Size;
use horizon_entry_core::logging::targets;
use parking_lot::Mutex;

/// Error type for texture operations.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The image file could not be read or decoded.
    #[error("failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },
    /// Width or height was zero.
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// Pixel buffer length does not match the dimensions.
    #[error("texture data size mismatch: expected {expected} bytes, got {actual}")]
    DataSizeMismatch { expected: usize, actual: usize },
}

/// A decoded RGBA8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Texture {
    /// Build a texture from raw RGBA8 pixels.
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::DataSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }

    /// A texture filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, TextureError> {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::from_rgba(pixels, width, height)
    }

    /// Decode an image file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| TextureError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(rgba.into_raw(), width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural size in pixels.
    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    /// Raw RGBA8 pixel data, row-major.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureCacheStats {
    /// Lookups served from the cache.
    pub hits: usize,
    /// Lookups that had to decode a file.
    pub misses: usize,
    /// Number of cached textures.
    pub entries: usize,
}

/// Path-keyed cache of decoded textures.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: Mutex<HashMap<PathBuf, Arc<Texture>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl TextureCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the texture for `path`, decoding the file on first use.
    pub fn texture(&self, path: impl AsRef<Path>) -> Result<Arc<Texture>, TextureError> {
        let path = path.as_ref();
        if let Some(texture) = self.entries.lock().get(path) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(texture));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let texture = Arc::new(Texture::from_path(path)?);
        tracing::debug!(
            target: targets::TEXTURE,
            path = %path.display(),
            width = texture.width(),
            height = texture.height(),
            "loaded texture"
        );
        self.entries
            .lock()
            .insert(path.to_path_buf(), Arc::clone(&texture));
        Ok(texture)
    }

    /// Seed the cache with an already-decoded texture.
    pub fn insert(&self, path: impl Into<PathBuf>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.entries.lock().insert(path.into(), Arc::clone(&texture));
        texture
    }

    /// Whether `path` is cached.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.lock().contains_key(path.as_ref())
    }

    /// Drop every cached texture. Handles already given out stay valid.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn stats(&self) -> TextureCacheStats {
        TextureCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len(),
        }
    }
}
