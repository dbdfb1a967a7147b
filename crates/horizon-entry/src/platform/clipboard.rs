//! Clipboard service for copy/cut/paste.
//!
//! Widgets talk to the clipboard through the [`Clipboard`] trait. Reads are
//! asynchronous: [`Clipboard::request_text`] returns immediately and the
//! callback runs later, when the host drains its [`TaskQueue`].
//!
//! Two implementations are provided:
//!
//! - [`SystemClipboard`] wraps `arboard` (behind the `system-clipboard`
//!   feature).
//! - [`MemoryClipboard`] keeps the text in memory and counts accesses, for
//!   tests and headless hosts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_entry::platform::{Clipboard, MemoryClipboard};
//! use horizon_entry_core::TaskQueue;
//!
//! let tasks = Arc::new(TaskQueue::new());
//! let clipboard = MemoryClipboard::new(tasks.clone());
//! clipboard.set_text("hello").unwrap();
//!
//! clipboard.request_text(Box::new(|text| assert_eq!(text.as_deref(), Some("hello"))));
//! assert_eq!(tasks.process_all(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_entry_core::TaskQueue;
use horizon_entry_core::logging::targets;
use parking_lot::Mutex;

/// Error type for clipboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The system clipboard could not be opened or written.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "system-clipboard")]
impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Callback receiving the clipboard text, or `None` when it holds no text.
pub type TextCallback = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// A clipboard the entry widget can read from and write to.
pub trait Clipboard: Send + Sync {
    /// Ask for the clipboard text. The callback runs later, never inside
    /// this call.
    fn request_text(&self, callback: TextCallback);

    /// Replace the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard, accessed through `arboard`.
///
/// The clipboard is opened per operation. Reads happen on the thread that
/// drains the task queue, which is the UI thread.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    tasks: Arc<TaskQueue>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Create a clipboard that delivers reads through `tasks`.
    pub fn new(tasks: Arc<TaskQueue>) -> Self {
        Self { tasks }
    }

    fn read_text() -> Option<String> {
        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => Some(text),
            Err(arboard::Error::ContentNotAvailable) => None,
            Err(err) => {
                tracing::warn!(target: targets::CLIPBOARD, error = %err, "failed to read clipboard");
                None
            }
        }
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn request_text(&self, callback: TextCallback) {
        self.tasks.post(move || callback(Self::read_text()));
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        tracing::debug!(target: targets::CLIPBOARD, len = text.len(), "wrote clipboard");
        Ok(())
    }
}

#[cfg(feature = "system-clipboard")]
impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// An in-process clipboard.
///
/// Reads see the contents at delivery time, not at request time. Every
/// request and write is counted so callers can check whether the clipboard
/// was touched at all.
#[derive(Debug)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    tasks: Arc<TaskQueue>,
    requests: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryClipboard {
    /// An empty clipboard that delivers reads through `tasks`.
    pub fn new(tasks: Arc<TaskQueue>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(None)),
            tasks,
            requests: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Current contents, without counting as a request.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    /// Empty the clipboard.
    pub fn clear(&self) {
        *self.contents.lock() = None;
    }

    /// Number of [`Clipboard::request_text`] calls so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Number of [`Clipboard::set_text`] calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Total number of accesses.
    pub fn access_count(&self) -> usize {
        self.request_count() + self.write_count()
    }
}

impl Clipboard for MemoryClipboard {
    fn request_text(&self, callback: TextCallback) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let contents = Arc::clone(&self.contents);
        self.tasks.post(move || {
            let text = contents.lock().clone();
            callback(text);
        });
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        *self.contents.lock() = Some(text.to_string());
        tracing::trace!(target: targets::CLIPBOARD, len = text.len(), "wrote memory clipboard");
        Ok(())
    }
}
