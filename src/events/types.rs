//! Event type definitions for rendering.

use crate::core::history::HistoryEntry;
use serde::{Deserialize, Serialize};

/// All events emitted by the widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Quote display events
    Display(DisplayEvent),
    /// History list events
    History(HistoryEvent),
    /// Theme events
    Theme(ThemeEvent),
    /// A fetch started or finished
    LoadingChanged { loading: bool },
}

/// Events from the reveal sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DisplayEvent {
    /// A quote is being previewed; the full text is still hidden
    Previewed {
        sequence: u64,
        preview: String,
        author: String,
    },
    /// The full text of the current quote became visible
    Revealed { sequence: u64, content: String },
    /// A fetch failed; the previous quote stays on screen
    Failed { message: String },
}

/// Events from the history store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// The list changed (or boot); re-render it
    Changed { entries: Vec<HistoryEntry> },
}

/// Events from the theme store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ThemeEvent {
    Changed { dark: bool },
}
