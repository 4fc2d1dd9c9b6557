//! # Events Module
//!
//! Event-driven rendering for any front end.
//!
//! ## Design
//! The library never draws anything. The reveal sequencer, history store
//! and theme store emit events through a channel and the UI (terminal,
//! GUI, tests) subscribes and renders.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Display(DisplayEvent::Revealed { content, .. }) => println!("{content}"),
//!             Event::History(HistoryEvent::Changed { entries }) => {
//!                 println!("{} saved", entries.len())
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
