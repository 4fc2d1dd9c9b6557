//! # Quote History Module
//!
//! Stores and retrieves the quotes a user has seen or saved.
//!
//! ## Features
//! - Persistent storage through any `KeyValueStore`
//! - Normalization on read: malformed elements are dropped, never fatal
//! - Bounded length (50 entries, most recent first)
//! - Adjacent-duplicate suppression

mod store;
mod types;

pub use store::HistoryStore;
pub use types::{HistoryEntry, HistoryList, ParsedHistory, MAX_ITEMS};
