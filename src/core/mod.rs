//! # Core Module
//!
//! The UI-agnostic quote engine.
//!
//! ## Modules
//! - `quote` - The quote record and where quotes come from
//! - `storage` - Durable key-value storage
//! - `history` - Bounded, validated history of saved quotes
//! - `reveal` - Preview-then-reveal sequencing
//! - `theme` - Persisted dark-mode flag
//! - `clipboard` - Copying quotes out
//! - `widget` - Orchestrates the full workflow

pub mod clipboard;
pub mod history;
pub mod quote;
pub mod reveal;
pub mod storage;
pub mod theme;
pub mod widget;

// Re-export commonly used types
pub use history::{HistoryEntry, HistoryList, HistoryStore};
pub use quote::{Quote, QuoteSource};
pub use reveal::{DisplayPhase, RevealOptions, RevealSequencer};
pub use widget::{QuoteWidget, WidgetConfig};
