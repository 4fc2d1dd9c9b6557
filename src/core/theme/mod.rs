//! # Theme Module
//!
//! Persisted dark-mode preference.
//!
//! Stored as a single character under its own key: `"1"` is dark,
//! anything else (including a missing or garbled value) is light.

use crate::core::storage::{KeyValueStore, DARK_MODE_KEY};
use crate::events::{null_sender, Event, EventSender, ThemeEvent};
use std::sync::Arc;

/// Dark-mode flag on top of a key-value store
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    events: EventSender,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            events: null_sender(),
        }
    }

    /// Emit `ThemeEvent::Changed` on this sender
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Whether dark mode is on. Never fails.
    pub fn is_dark(&self) -> bool {
        match self.storage.get(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("1"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read theme preference");
                false
            }
        }
    }

    /// Persist the flag and announce it
    pub fn set_dark(&self, dark: bool) {
        let value = if dark { "1" } else { "0" };
        if let Err(e) = self.storage.set(DARK_MODE_KEY, value) {
            tracing::error!(error = %e, "Failed to save theme preference");
        }
        self.events.send(Event::Theme(ThemeEvent::Changed { dark }));
    }

    /// Flip the flag, returning the new state
    pub fn toggle(&self) -> bool {
        let dark = !self.is_dark();
        self.set_dark(dark);
        dark
    }

    /// Announce the stored preference without changing it (boot)
    pub fn apply(&self) -> bool {
        let dark = self.is_dark();
        self.events.send(Event::Theme(ThemeEvent::Changed { dark }));
        dark
    }
}
