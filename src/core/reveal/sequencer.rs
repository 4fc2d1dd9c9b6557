//! The reveal sequencer and its display slot.

use super::scheduler::Scheduler;
use crate::core::clipboard::Clipboard;
use crate::core::quote::Quote;
use crate::error::CopyError;
use crate::events::{null_sender, DisplayEvent, Event, EventSender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Characters shown before the preview is ellipsized
pub const DEFAULT_PREVIEW_LENGTH: usize = 30;

/// Time between preview and full reveal
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1200);

/// How a quote is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOptions {
    pub preview_length: usize,
    pub reveal_delay: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            preview_length: DEFAULT_PREVIEW_LENGTH,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

impl RevealOptions {
    pub fn preview_length(mut self, preview_length: usize) -> Self {
        self.preview_length = preview_length;
        self
    }

    pub fn reveal_delay(mut self, reveal_delay: Duration) -> Self {
        self.reveal_delay = reveal_delay;
        self
    }
}

/// Phase of the display slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    /// Nothing presented yet
    Empty,
    /// Preview visible, full text hidden
    Previewing,
    /// Full text visible
    Revealed,
}

/// What the display currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlot {
    pub phase: DisplayPhase,
    /// Presentation that owns the slot; 0 before the first one
    pub sequence: u64,
    pub preview: String,
    pub author: String,
    pub full_text: String,
}

impl DisplaySlot {
    fn empty() -> Self {
        Self {
            phase: DisplayPhase::Empty,
            sequence: 0,
            preview: String::new(),
            author: String::new(),
            full_text: String::new(),
        }
    }
}

struct SlotState {
    slot: DisplaySlot,
    current: Option<Quote>,
}

/// `content` cut to `preview_length` characters plus `…`, or unchanged if short enough
pub fn preview_text(content: &str, preview_length: usize) -> String {
    match content.char_indices().nth(preview_length) {
        Some((cut, _)) => format!("{}…", &content[..cut]),
        None => content.to_string(),
    }
}

/// Drives the preview-then-reveal transition and tracks the current quote
pub struct RevealSequencer {
    state: Arc<Mutex<SlotState>>,
    scheduler: Arc<dyn Scheduler>,
    events: EventSender,
}

impl RevealSequencer {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState {
                slot: DisplaySlot::empty(),
                current: None,
            })),
            scheduler,
            events: null_sender(),
        }
    }

    /// Emit display events on this sender
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Show the preview of `quote` now and schedule the full reveal.
    ///
    /// Returns the sequence number of this presentation.
    pub fn present(&self, quote: Quote, options: RevealOptions) -> u64 {
        let preview = preview_text(&quote.content, options.preview_length);
        let author = quote.author.clone();

        let sequence = {
            let mut state = lock(&self.state);
            let sequence = state.slot.sequence + 1;
            state.slot = DisplaySlot {
                phase: DisplayPhase::Previewing,
                sequence,
                preview: preview.clone(),
                author: author.clone(),
                full_text: quote.content.clone(),
            };
            state.current = Some(quote);
            sequence
        };

        tracing::debug!(
            sequence,
            delay_ms = options.reveal_delay.as_millis() as u64,
            "Presenting quote"
        );
        self.events.send(Event::Display(DisplayEvent::Previewed {
            sequence,
            preview,
            author,
        }));

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        self.scheduler.schedule(
            options.reveal_delay,
            Box::new(move || reveal(&state, &events, sequence)),
        );

        sequence
    }

    /// Last quote passed to `present`
    pub fn get_current(&self) -> Option<Quote> {
        lock(&self.state).current.clone()
    }

    pub fn snapshot(&self) -> DisplaySlot {
        lock(&self.state).slot.clone()
    }

    /// Copy `"{content} — {author}"` of the current quote.
    ///
    /// Returns the copied text.
    pub fn copy_current_to_clipboard(
        &self,
        clipboard: &dyn Clipboard,
    ) -> Result<String, CopyError> {
        let quote = self.get_current().ok_or(CopyError::NoCurrentQuote)?;
        let text = quote.attribution();
        clipboard.write_text(&text)?;
        Ok(text)
    }
}

fn lock(state: &Mutex<SlotState>) -> MutexGuard<'_, SlotState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn reveal(state: &Mutex<SlotState>, events: &EventSender, sequence: u64) {
    let content = {
        let mut state = lock(state);
        if state.slot.sequence != sequence {
            tracing::debug!(sequence, current = state.slot.sequence, "Skipping stale reveal");
            return;
        }
        if state.slot.phase == DisplayPhase::Revealed {
            return;
        }
        state.slot.phase = DisplayPhase::Revealed;
        state.slot.full_text.clone()
    };

    events.send(Event::Display(DisplayEvent::Revealed { sequence, content }));
}
