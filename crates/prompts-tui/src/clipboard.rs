//! System clipboard access.
//!
//! The browser and the `copy` command only see [`ClipboardWriter`]; the
//! arboard-backed [`SystemClipboard`] is the production implementation.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardWriteError {
    /// No clipboard could be opened (headless session, unsupported platform)
    #[error("Clipboard not available: {0}")]
    Unavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    Write(String),
}

impl ClipboardWriteError {
    /// Short message suitable for a toast
    pub fn summary(&self) -> &'static str {
        match self {
            ClipboardWriteError::Unavailable(_) => "Clipboard not available",
            ClipboardWriteError::Write(_) => "Failed to copy to clipboard",
        }
    }
}

/// Something that can place text on a clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteError>;

    /// Write `text` so that it outlives this process.
    ///
    /// Needed by short-lived callers; may block until another program
    /// takes over the clipboard.
    fn write_text_and_wait(&mut self, text: &str) -> Result<(), ClipboardWriteError> {
        self.write_text(text)
    }
}

/// The host clipboard via arboard.
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardWriteError> {
        Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardWriteError::Unavailable(e.to_string()))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardWriteError::Write(e.to_string()))
    }

    // X11 selections are served by the owning process and vanish when it exits
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn write_text_and_wait(&mut self, text: &str) -> Result<(), ClipboardWriteError> {
        use arboard::SetExtLinux;

        log::debug!("Serving clipboard contents until another owner takes over");
        self.inner
            .set()
            .wait()
            .text(text)
            .map_err(|e| ClipboardWriteError::Write(e.to_string()))
    }
}
