//! Image-backed icon actor.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use horizon_entry_core::{Object, ObjectId, Rect, Signal, Size};

use crate::platform::{Texture, TextureCache, TextureError};
use crate::widget::{MouseButton, SizeRequest, Widget, WidgetBase, WidgetEvent};

/// An actor that draws one cached texture at its natural size.
///
/// A left-button release emits [`IconActor::clicked`]. The event is not
/// consumed, so the enclosing widget still sees it.
pub struct IconActor {
    base: WidgetBase,
    texture: Arc<Texture>,
    path: PathBuf,
    /// Emitted on a left-button release over the icon.
    pub clicked: Signal<()>,
}

impl IconActor {
    /// Create an icon for `path`, loading its texture through `cache`.
    pub fn from_file(cache: &TextureCache, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let texture = cache.texture(path)?;
        Ok(Self::from_texture(texture, path))
    }

    /// Create an icon for an already-loaded texture.
    pub fn from_texture(texture: Arc<Texture>, path: impl Into<PathBuf>) -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            texture,
            path: path.into(),
            clicked: Signal::new(),
        }
    }

    /// The file the icon was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    /// The texture's size in pixels.
    pub fn natural_size(&self) -> Size {
        self.texture.size()
    }
}

impl Object for IconActor {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Widget for IconActor {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn preferred_width(&self, _for_height: Option<f32>) -> SizeRequest {
        SizeRequest::fixed(self.natural_size().width)
    }

    fn preferred_height(&self, _for_width: Option<f32>) -> SizeRequest {
        SizeRequest::fixed(self.natural_size().height)
    }

    fn allocate(&self, rect: Rect) {
        self.base.set_geometry(rect);
    }

    fn event(&self, event: &mut WidgetEvent) -> bool {
        if let WidgetEvent::MouseRelease(release) = event
            && release.button == MouseButton::Left
        {
            self.clicked.emit(());
        }
        false
    }
}

impl std::fmt::Debug for IconActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconActor")
            .field("id", &self.base.id())
            .field("path", &self.path)
            .field("size", &self.natural_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{KeyboardModifiers, MouseReleaseEvent};
    use horizon_entry_core::{Point, init_global_registry};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> TextureCache {
        init_global_registry();
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let cache = TextureCache::new();
        cache.insert("find.png", Texture::solid(16, 12, [0, 0, 0, 255]).unwrap());
        cache
    }

    fn release(button: MouseButton) -> WidgetEvent {
        WidgetEvent::MouseRelease(MouseReleaseEvent::new(button, Point::ZERO, KeyboardModifiers::NONE))
    }

    #[test]
    fn test_icon_sizes_from_texture() {
        let cache = setup();
        let icon = IconActor::from_file(&cache, "find.png").unwrap();
        assert_eq!(icon.preferred_width(None), SizeRequest::fixed(16.0));
        assert_eq!(icon.preferred_height(None), SizeRequest::fixed(12.0));
        assert_eq!(icon.path(), Path::new("find.png"));
    }

    #[test]
    fn test_left_release_clicks_without_consuming() {
        let cache = setup();
        let icon = IconActor::from_file(&cache, "find.png").unwrap();
        let clicks = Arc::new(AtomicUsize::new(0));
        let seen = clicks.clone();
        icon.clicked.connect(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!icon.event(&mut release(MouseButton::Left)));
        assert!(!icon.event(&mut release(MouseButton::Right)));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_file() {
        let cache = setup();
        assert!(IconActor::from_file(&cache, "/nonexistent/missing.png").is_err());
    }
}
