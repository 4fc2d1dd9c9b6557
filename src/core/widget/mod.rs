//! # Widget Module
//!
//! Ties the quote source, reveal sequencer, history and theme together.
//!
//! ## Flow
//! 1. **Fetch** - Ask the quote source for a random quote
//! 2. **Present** - Preview now, reveal after the delay
//! 3. **Save** - Push the quote into history (automatic by default)
//! 4. **Render** - Every change is announced through events

mod app;

pub use app::{QuoteWidget, WidgetBuilder, WidgetConfig, FETCH_FAILED_MESSAGE};
