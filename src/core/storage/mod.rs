//! # Storage Module
//!
//! Durable key-value text storage, the local stand-in for browser storage.
//!
//! ## Keys
//! - `rq_history_v2` - JSON-encoded history array
//! - `rq_dark_v2` - dark-mode flag (`"1"` / `"0"`)
//!
//! ## Backends
//! - `SqliteStore` - Persistent storage using SQLite
//! - `InMemoryStore` - For testing

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;

/// Key holding the serialized history list
pub const HISTORY_KEY: &str = "rq_history_v2";

/// Key holding the dark-mode flag
pub const DARK_MODE_KEY: &str = "rq_dark_v2";
