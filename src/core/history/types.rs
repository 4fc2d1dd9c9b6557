//! Types for quote history storage.

use crate::core::quote::{Quote, UNKNOWN_AUTHOR};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Maximum number of entries kept in durable storage
pub const MAX_ITEMS: usize = 50;

/// A saved quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub quote: Quote,
    /// Unix timestamp in milliseconds
    #[serde(rename = "savedAt")]
    pub saved_at: i64,
}

impl HistoryEntry {
    pub fn new(quote: Quote, saved_at: i64) -> Self {
        Self { quote, saved_at }
    }

    /// Rebuild an entry from an untyped stored element.
    ///
    /// Returns `None` unless the element is an object with a non-blank
    /// string `content`. Every other field falls back to a default.
    pub fn from_stored(value: &Value, now_millis: i64) -> Option<Self> {
        let record = value.as_object()?;

        let content = record.get("content")?.as_str()?;
        if content.trim().is_empty() {
            return None;
        }

        let id = non_empty_str(record, "id")
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let author = non_empty_str(record, "author").unwrap_or(UNKNOWN_AUTHOR);

        Some(Self {
            quote: Quote {
                id,
                content: content.to_string(),
                author: author.to_string(),
            },
            saved_at: normalize_timestamp(record.get("savedAt"), now_millis),
        })
    }
}

fn non_empty_str<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Coerce a stored timestamp to finite epoch millis, or `now_millis`.
fn normalize_timestamp(value: Option<&Value>, now_millis: i64) -> i64 {
    let numeric = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Some(Value::String(s)) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64),
        _ => None,
    };
    numeric.unwrap_or(now_millis)
}

/// Saved quotes, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently saved entry
    pub fn front(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }

    /// Insert `quote` at the front unless the front entry has the same content.
    ///
    /// Only the adjacent entry is compared; older repeats are kept.
    /// Returns whether an entry was inserted.
    pub fn insert_front(&mut self, quote: Quote, saved_at: i64) -> bool {
        if self
            .front()
            .is_some_and(|front| front.quote.content == quote.content)
        {
            return false;
        }
        self.entries.insert(0, HistoryEntry::new(quote, saved_at));
        true
    }

    /// JSON form of the first [`MAX_ITEMS`] entries
    pub fn to_stored(&self) -> serde_json::Result<String> {
        let kept = &self.entries[..self.entries.len().min(MAX_ITEMS)];
        serde_json::to_string(kept)
    }

    /// Parse raw stored text, normalizing each element independently.
    pub fn parse(raw: Option<&str>, now_millis: i64) -> ParsedHistory {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return ParsedHistory::Missing;
        };

        let value = match parse_value(raw) {
            Ok(value) => value,
            Err(e) => return ParsedHistory::Corrupt(e.to_string()),
        };

        let Value::Array(items) = value else {
            return ParsedHistory::Corrupt("expected a JSON array".to_string());
        };

        let entries = items
            .iter()
            .filter_map(|item| HistoryEntry::from_stored(item, now_millis))
            .collect();

        ParsedHistory::Entries(Self { entries })
    }
}

/// Parse `raw` without a nesting limit, growing the stack as needed.
///
/// Out-of-range numbers are kept as text, so a single odd element cannot
/// fail the whole array.
fn parse_value(raw: &str) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_str(raw);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

impl From<Vec<HistoryEntry>> for HistoryList {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }
}

/// Outcome of reading the stored history blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedHistory {
    /// Nothing stored yet
    Missing,
    /// Stored text was not a JSON array
    Corrupt(String),
    /// Well-formed subset of the stored elements
    Entries(HistoryList),
}

impl ParsedHistory {
    pub fn into_list(self) -> HistoryList {
        match self {
            Self::Entries(list) => list,
            Self::Missing | Self::Corrupt(_) => HistoryList::new(),
        }
    }
}
