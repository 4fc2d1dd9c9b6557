//! # Clipboard Module
//!
//! Hands plain text to the system clipboard.
//!
//! ## Backends
//! - `SystemClipboard` - Pipes text into the platform clipboard tool
//! - `MemoryClipboard` - Keeps the last text in memory (tests, headless use)

mod system;

pub use system::SystemClipboard;

use crate::error::ClipboardError;
use std::sync::Mutex;

/// Trait for clipboard backends
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that only remembers the last text written
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_text() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.contents().is_none());

        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("second"));
    }
}
