//! Durable history operations.

use super::types::{HistoryEntry, HistoryList, ParsedHistory};
use crate::core::quote::Quote;
use crate::core::storage::{KeyValueStore, HISTORY_KEY};
use crate::events::{null_sender, Event, EventSender, HistoryEvent};
use std::sync::{Arc, Mutex};

/// History of saved quotes on top of a key-value store
///
/// Every read tolerates garbage and every write failure is logged and
/// swallowed, so callers never see an error from this type.
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStore>,
    events: EventSender,
    // Serializes the load-modify-save in `push`
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            events: null_sender(),
            write_lock: Mutex::new(()),
        }
    }

    /// Emit `HistoryEvent::Changed` on this sender after every mutation
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Read the stored history, dropping anything malformed
    pub fn load(&self) -> HistoryList {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load history");
                return HistoryList::new();
            }
        };

        match HistoryList::parse(raw.as_deref(), now_millis()) {
            ParsedHistory::Corrupt(reason) => {
                tracing::warn!(%reason, "History storage contained unexpected data; resetting");
                HistoryList::new()
            }
            parsed => parsed.into_list(),
        }
    }

    /// Persist `list`, keeping only the first `MAX_ITEMS` entries
    pub fn save(&self, list: &HistoryList) {
        self.persist(list);
        self.render_list(list.clone());
    }

    /// Insert `quote` at the front of the stored history.
    ///
    /// No-op when the most recent entry has the same content or when
    /// `quote.content` is blank, since `load` would drop such an entry.
    /// Returns whether an entry was inserted.
    pub fn push(&self, quote: &Quote) -> bool {
        if quote.content.trim().is_empty() {
            tracing::warn!(id = %quote.id, "Refusing to save a quote without content");
            return false;
        }

        let (inserted, list) = {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

            let mut list = self.load();
            let inserted = list.insert_front(quote.clone(), now_millis());
            if inserted {
                self.persist(&list);
            } else {
                tracing::debug!(id = %quote.id, "Quote already at front of history");
            }
            (inserted, list)
        };

        self.render_list(list);
        inserted
    }

    /// Remove all stored history
    pub fn clear(&self) {
        {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
            if let Err(e) = self.storage.remove(HISTORY_KEY) {
                tracing::error!(error = %e, "Failed to clear history");
            }
        }
        self.render_list(HistoryList::new());
    }

    /// Entry at `index` of the stored history
    pub fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.load().get(index).cloned()
    }

    /// Load the history and emit it for rendering
    pub fn render(&self) -> HistoryList {
        let list = self.load();
        self.render_list(list.clone());
        list
    }

    fn persist(&self, list: &HistoryList) {
        let stored = match list.to_stored() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize history");
                return;
            }
        };

        if let Err(e) = self.storage.set(HISTORY_KEY, &stored) {
            tracing::error!(error = %e, "Failed to save history");
        }
    }

    fn render_list(&self, list: HistoryList) {
        self.events.send(Event::History(HistoryEvent::Changed {
            entries: list.into_entries(),
        }));
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::MAX_ITEMS;
    use crate::core::storage::InMemoryStore;
    use crate::events::EventChannel;

    fn create_store() -> (HistoryStore, Arc<InMemoryStore>) {
        let storage = Arc::new(InMemoryStore::new());
        (HistoryStore::new(storage.clone()), storage)
    }

    fn full_list() -> HistoryList {
        (0..MAX_ITEMS)
            .map(|i| {
                HistoryEntry::new(
                    Quote::with_id(format!("q{i}"), format!("Quote {i}"), "Author"),
                    i as i64,
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn empty_storage_loads_empty_list() {
        let (store, _) = create_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty_list() {
        let (store, storage) = create_store();

        storage.set(HISTORY_KEY, "{ definitely not an array").unwrap();
        assert!(store.load().is_empty());

        storage.set(HISTORY_KEY, r#"{"content":"object, not array"}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn mixed_blob_keeps_well_formed_subset() {
        let (store, storage) = create_store();
        storage
            .set(
                HISTORY_KEY,
                r#"[1, "two", {"content": "Kept", "author": "A", "savedAt": 10}, {"id": "x"}]"#,
            )
            .unwrap();

        let list = store.load();

        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].quote.content, "Kept");
    }

    #[test]
    fn push_on_full_list_drops_oldest() {
        let (store, _) = create_store();
        store.save(&full_list());

        let fresh = Quote::with_id("new", "Brand new", "Someone");
        assert!(store.push(&fresh));

        let list = store.load();
        assert_eq!(list.len(), MAX_ITEMS);
        assert_eq!(list.entries()[0].quote, fresh);
        assert_eq!(list.entries()[1].quote.id, "q0");
        assert!(list.iter().all(|e| e.quote.id != format!("q{}", MAX_ITEMS - 1)));
    }

    #[test]
    fn push_same_content_leaves_list_unchanged() {
        let (store, _) = create_store();
        store.push(&Quote::new("Be yourself", "Oscar Wilde"));
        let before = store.load();

        assert!(!store.push(&Quote::new("Be yourself", "Someone else")));

        assert_eq!(store.load(), before);
    }

    #[test]
    fn push_blank_content_is_rejected() {
        let (store, storage) = create_store();

        assert!(!store.push(&Quote::new("", "Nobody")));
        assert!(!store.push(&Quote::new("   ", "Nobody")));

        assert!(storage.get(HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn concurrent_pushes_keep_every_entry() {
        let store = Arc::new(HistoryStore::new(Arc::new(InMemoryStore::new())));

        let handles: Vec<_> = (0..8)
            .map(|thread| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..5 {
                        assert!(store.push(&Quote::new(format!("t{thread}-q{i}"), "Racer")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let list = store.load();
        assert_eq!(list.len(), 40);
        for thread in 0..8 {
            for i in 0..5 {
                let content = format!("t{thread}-q{i}");
                assert!(list.iter().any(|e| e.quote.content == content), "{content} lost");
            }
        }
    }

    #[test]
    fn push_stamps_saved_at_with_now() {
        let (store, _) = create_store();
        let before = now_millis();

        store.push(&Quote::new("Timed", "Clock"));

        let saved_at = store.load().front().unwrap().saved_at;
        assert!(saved_at >= before);
        assert!(saved_at <= now_millis());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (store, _) = create_store();
        let list = full_list();

        store.save(&list);

        assert_eq!(store.load(), list);
    }

    #[test]
    fn clear_then_load_is_empty() {
        let (store, storage) = create_store();
        store.push(&Quote::new("Gone soon", "A"));

        store.clear();

        assert!(store.load().is_empty());
        assert!(storage.get(HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn write_failure_is_swallowed() {
        let storage = Arc::new(InMemoryStore::with_quota(64));
        let store = HistoryStore::new(storage);

        // Serialized entry is larger than the quota
        let inserted = store.push(&Quote::new("x".repeat(200), "Quota"));

        assert!(inserted);
        assert!(store.load().is_empty());
    }

    #[test]
    fn mutations_emit_render_events() {
        let (sender, receiver) = EventChannel::new();
        let store = HistoryStore::new(Arc::new(InMemoryStore::new())).with_events(sender);

        store.push(&Quote::new("A", "a"));
        store.clear();

        let lengths: Vec<usize> = receiver
            .drain()
            .into_iter()
            .filter_map(|event| match event {
                Event::History(HistoryEvent::Changed { entries }) => Some(entries.len()),
                _ => None,
            })
            .collect();
        assert_eq!(lengths, [1, 0]);
    }

    #[test]
    fn get_returns_entry_by_position() {
        let (store, _) = create_store();
        store.push(&Quote::new("Older", "a"));
        store.push(&Quote::new("Newer", "b"));

        assert_eq!(store.get(0).unwrap().quote.content, "Newer");
        assert_eq!(store.get(1).unwrap().quote.content, "Older");
        assert!(store.get(2).is_none());
    }
}
