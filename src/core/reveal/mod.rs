//! # Reveal Module
//!
//! Two-phase display of a quote: a short preview right away, the full
//! text after a delay.
//!
//! ## Sequencing
//! Every `present` bumps a sequence number. A scheduled reveal only acts
//! if its sequence is still the current one, so overlapping timers from
//! rapid re-presents never reveal superseded text.
//!
//! ## Schedulers
//! - `ThreadScheduler` - Sleeps on a worker thread, fire-and-forget
//! - `ManualScheduler` - Virtual clock advanced by the caller (tests)

mod scheduler;
mod sequencer;

pub use scheduler::{ManualScheduler, Scheduler, Task, ThreadScheduler};
pub use sequencer::{
    preview_text, DisplayPhase, DisplaySlot, RevealOptions, RevealSequencer,
    DEFAULT_PREVIEW_LENGTH, DEFAULT_REVEAL_DELAY,
};
