//! Widget orchestration.

use crate::core::clipboard::{Clipboard, SystemClipboard};
use crate::core::history::{HistoryList, HistoryStore};
use crate::core::quote::{HttpQuoteSource, Quote, QuoteSource, DEFAULT_API_URL};
use crate::core::reveal::{DisplaySlot, RevealOptions, RevealSequencer, Scheduler, ThreadScheduler};
use crate::core::storage::{InMemoryStore, KeyValueStore};
use crate::core::theme::ThemeStore;
use crate::error::{CopyError, FetchError, QuoteMomentError};
use crate::events::{null_sender, DisplayEvent, Event, EventSender};
use std::sync::Arc;
use std::time::Duration;

/// Shown in place of the preview when a fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Could not load quote. Please try again.";

/// Configuration for the widget
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Endpoint used when no quote source is supplied
    pub api_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Preview length and reveal delay for fetched quotes
    pub reveal: RevealOptions,
    /// Reveal delay when re-showing a history entry
    pub restore_delay: Duration,
    /// Push every fetched quote into history
    pub auto_save: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            reveal: RevealOptions::default(),
            restore_delay: Duration::from_millis(200),
            auto_save: true,
        }
    }
}

/// Builder for widget configuration
pub struct WidgetBuilder {
    config: WidgetConfig,
    source: Option<Box<dyn QuoteSource>>,
    storage: Option<Arc<dyn KeyValueStore>>,
    clipboard: Option<Box<dyn Clipboard>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    events: Option<EventSender>,
}

impl WidgetBuilder {
    /// Create a new widget builder
    pub fn new() -> Self {
        Self {
            config: WidgetConfig::default(),
            source: None,
            storage: None,
            clipboard: None,
            scheduler: None,
            events: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the quote API endpoint
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the preview length
    pub fn preview_length(mut self, preview_length: usize) -> Self {
        self.config.reveal.preview_length = preview_length;
        self
    }

    /// Set the delay before the full text is revealed
    pub fn reveal_delay(mut self, delay: Duration) -> Self {
        self.config.reveal.reveal_delay = delay;
        self
    }

    /// Set the reveal delay used when restoring from history
    pub fn restore_delay(mut self, delay: Duration) -> Self {
        self.config.restore_delay = delay;
        self
    }

    /// Enable or disable saving fetched quotes automatically
    pub fn auto_save(mut self, auto_save: bool) -> Self {
        self.config.auto_save = auto_save;
        self
    }

    /// Set the quote source
    pub fn source(mut self, source: Box<dyn QuoteSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the durable storage backend
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the clipboard backend
    pub fn clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Set the reveal scheduler
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Set the event sender used for rendering
    pub fn events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the widget
    pub fn build(self) -> Result<QuoteWidget, QuoteMomentError> {
        let source = match self.source {
            Some(source) => source,
            None => Box::new(HttpQuoteSource::new(
                self.config.api_url.clone(),
                self.config.request_timeout,
            )?),
        };
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()));
        let scheduler = self.scheduler.unwrap_or_else(|| Arc::new(ThreadScheduler));
        let events = self.events.unwrap_or_else(null_sender);

        Ok(QuoteWidget {
            sequencer: RevealSequencer::new(scheduler).with_events(events.clone()),
            history: HistoryStore::new(Arc::clone(&storage)).with_events(events.clone()),
            theme: ThemeStore::new(storage).with_events(events.clone()),
            clipboard: self
                .clipboard
                .unwrap_or_else(|| Box::new(SystemClipboard::new())),
            config: self.config,
            source,
            events,
        })
    }
}

impl Default for WidgetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The quote-of-the-moment widget
pub struct QuoteWidget {
    config: WidgetConfig,
    source: Box<dyn QuoteSource>,
    sequencer: RevealSequencer,
    history: HistoryStore,
    theme: ThemeStore,
    clipboard: Box<dyn Clipboard>,
    events: EventSender,
}

impl QuoteWidget {
    /// Create a new widget builder
    pub fn builder() -> WidgetBuilder {
        WidgetBuilder::new()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Apply the stored theme and render the stored history
    pub fn boot(&self) -> HistoryList {
        self.theme.apply();
        self.history.render()
    }

    /// Fetch a quote and present it.
    ///
    /// On failure the previous quote stays current and a
    /// `DisplayEvent::Failed` is emitted for the UI.
    pub fn load_and_show(&self) -> Result<Quote, FetchError> {
        self.events.send(Event::LoadingChanged { loading: true });

        let outcome = match self.source.fetch_random() {
            Ok(quote) => {
                self.sequencer.present(quote.clone(), self.config.reveal);
                if self.config.auto_save {
                    self.history.push(&quote);
                }
                Ok(quote)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load quote");
                self.events.send(Event::Display(DisplayEvent::Failed {
                    message: FETCH_FAILED_MESSAGE.to_string(),
                }));
                Err(e)
            }
        };

        self.events.send(Event::LoadingChanged { loading: false });
        outcome
    }

    /// Push the current quote into history.
    ///
    /// Returns whether a new entry was added.
    pub fn save_current(&self) -> bool {
        match self.sequencer.get_current() {
            Some(quote) => self.history.push(&quote),
            None => {
                self.history.render();
                false
            }
        }
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }

    /// Copy the current quote to the clipboard
    pub fn copy_current(&self) -> Result<String, CopyError> {
        self.sequencer
            .copy_current_to_clipboard(self.clipboard.as_ref())
    }

    /// Present the history entry at `index` again with the short restore delay
    pub fn restore(&self, index: usize) -> Option<Quote> {
        let entry = self.history.get(index)?;
        let options = self.config.reveal.reveal_delay(self.config.restore_delay);
        self.sequencer.present(entry.quote.clone(), options);
        Some(entry.quote)
    }

    pub fn toggle_dark(&self) -> bool {
        self.theme.toggle()
    }

    pub fn set_dark(&self, dark: bool) {
        self.theme.set_dark(dark);
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn current(&self) -> Option<Quote> {
        self.sequencer.get_current()
    }

    pub fn display(&self) -> DisplaySlot {
        self.sequencer.snapshot()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}
