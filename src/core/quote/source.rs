//! Quote source trait and a fixed in-memory implementation.

use super::Quote;
use crate::error::FetchError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for anything that can hand out a random quote
pub trait QuoteSource: Send + Sync {
    /// Fetch one quote
    fn fetch_random(&self) -> Result<Quote, FetchError>;
}

/// Quote source that cycles through a preset list
///
/// An empty list behaves like an unreachable API.
pub struct FixedQuoteSource {
    quotes: Vec<Quote>,
    next: AtomicUsize,
}

impl FixedQuoteSource {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            next: AtomicUsize::new(0),
        }
    }
}

impl QuoteSource for FixedQuoteSource {
    fn fetch_random(&self) -> Result<Quote, FetchError> {
        if self.quotes.is_empty() {
            return Err(FetchError::Status { status: 503 });
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.quotes.len();
        Ok(self.quotes[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_quotes() {
        let source = FixedQuoteSource::new(vec![
            Quote::with_id("a", "First", "A"),
            Quote::with_id("b", "Second", "B"),
        ]);

        assert_eq!(source.fetch_random().unwrap().id, "a");
        assert_eq!(source.fetch_random().unwrap().id, "b");
        assert_eq!(source.fetch_random().unwrap().id, "a");
    }

    #[test]
    fn empty_source_fails_like_network() {
        let source = FixedQuoteSource::new(Vec::new());
        assert!(matches!(
            source.fetch_random(),
            Err(FetchError::Status { status: 503 })
        ));
    }
}
