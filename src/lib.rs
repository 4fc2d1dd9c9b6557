//! # Quote Moment
//!
//! A quote of the moment, revealed a little at a time.
//!
//! ## Core Philosophy
//! - **Never crash on stored data** - garbage in storage is dropped, not fatal
//! - **Preview first** - a short teaser, then the full quote after a delay
//! - **Keep what you saw** - a bounded history survives restarts
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Quote fetching, reveal sequencing, history, theme
//! - `events` - Event-driven rendering (UI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{QuoteMomentError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Logs go to
/// stderr so they never mix with quotes printed on stdout.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default tracing subscriber: {e}");
    }
}
