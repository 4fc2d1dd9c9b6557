//! # Quote Module
//!
//! The quote record and the collaborators that produce it.
//!
//! ## Sources
//! - `HttpQuoteSource` - Fetches from a quotable-style HTTP API
//! - `FixedQuoteSource` - Cycles through a preset list (tests, offline use)

mod http;
mod source;

pub use http::{HttpQuoteSource, DEFAULT_API_URL};
pub use source::{FixedQuoteSource, QuoteSource};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author shown when a quote carries none
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A quote with a stable identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    /// Quote text. History refuses blank content.
    pub content: String,
    pub author: String,
}

impl Quote {
    /// Create a quote with a freshly generated id
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), content, author)
    }

    /// Create a quote with a known id
    ///
    /// A blank author is replaced by [`UNKNOWN_AUTHOR`].
    pub fn with_id(
        id: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        let author = author.into();
        Self {
            id: id.into(),
            content: content.into(),
            author: if author.trim().is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                author
            },
        }
    }

    /// `"{content} — {author}"`, the form handed to the clipboard
    pub fn attribution(&self) -> String {
        format!("{} — {}", self.content, self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_author_defaults_to_unknown() {
        let quote = Quote::new("Be yourself", "  ");
        assert_eq!(quote.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn new_quotes_get_distinct_ids() {
        let a = Quote::new("Be yourself", "Oscar Wilde");
        let b = Quote::new("Be yourself", "Oscar Wilde");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn attribution_joins_content_and_author() {
        let quote = Quote::with_id("q1", "Be yourself", "Oscar Wilde");
        assert_eq!(quote.attribution(), "Be yourself — Oscar Wilde");
    }
}
