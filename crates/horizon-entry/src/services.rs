//! Collaborators injected into every entry.

use std::sync::Arc;

use horizon_entry_core::TaskQueue;
use horizon_entry_style::{StyleEngine, StyleResolver};

use crate::platform::{Clipboard, MemoryClipboard, TextureCache};
use crate::widget::CursorManager;
use crate::widgets::{AverageAdvanceMetrics, TextMetrics};

/// The services an [`Entry`](crate::Entry) talks to.
///
/// Cloning is cheap; entries created from the same services share the
/// clipboard, textures, cursor and styles.
#[derive(Clone)]
pub struct EntryServices {
    /// Clipboard used for copy, cut and paste.
    pub clipboard: Arc<dyn Clipboard>,
    /// Source of icon textures.
    pub textures: Arc<TextureCache>,
    /// Pointer cursor of the window the entry lives in.
    pub cursor: Arc<CursorManager>,
    /// Resolves the entry's style.
    pub style: Arc<dyn StyleResolver>,
    /// Queue the host drains to run deferred callbacks.
    pub tasks: Arc<TaskQueue>,
    /// Measures the text node's content.
    pub metrics: Arc<dyn TextMetrics>,
}

impl EntryServices {
    /// Bundle explicit collaborators. Text is measured with
    /// [`AverageAdvanceMetrics`] until [`EntryServices::with_metrics`] says
    /// otherwise.
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        textures: Arc<TextureCache>,
        cursor: Arc<CursorManager>,
        style: Arc<dyn StyleResolver>,
        tasks: Arc<TaskQueue>,
    ) -> Self {
        Self {
            clipboard,
            textures,
            cursor,
            style,
            tasks,
            metrics: Arc::new(AverageAdvanceMetrics),
        }
    }

    /// Services backed by the system clipboard, styled by `style`.
    #[cfg(feature = "system-clipboard")]
    pub fn system(style: Arc<StyleEngine>) -> Self {
        let tasks = Arc::new(TaskQueue::new());
        Self::new(
            Arc::new(crate::platform::SystemClipboard::new(Arc::clone(&tasks))),
            Arc::new(TextureCache::new()),
            Arc::new(CursorManager::new()),
            style,
            tasks,
        )
    }

    /// Services with an in-memory clipboard, for tests and headless hosts.
    ///
    /// The clipboard is returned alongside so callers can inspect it.
    pub fn headless() -> (Self, Arc<MemoryClipboard>) {
        let tasks = Arc::new(TaskQueue::new());
        let clipboard = Arc::new(MemoryClipboard::new(Arc::clone(&tasks)));
        let services = Self::new(
            clipboard.clone(),
            Arc::new(TextureCache::new()),
            Arc::new(CursorManager::new()),
            Arc::new(StyleEngine::new()),
            tasks,
        );
        (services, clipboard)
    }

    /// Replace the text metrics.
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace the style resolver.
    pub fn with_style(mut self, style: Arc<dyn StyleResolver>) -> Self {
        self.style = style;
        self
    }
}

impl std::fmt::Debug for EntryServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryServices")
            .field("textures", &self.textures.stats())
            .field("cursor", &self.cursor.effective_cursor())
            .field("pending_tasks", &self.tasks.pending_count())
            .finish_non_exhaustive()
    }
}
