//! HTTP quote source backed by a quotable-style API.

use super::{Quote, QuoteSource, UNKNOWN_AUTHOR};
use crate::error::FetchError;
use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use std::time::Duration;

/// Public endpoint serving `{ _id, content, author }` records
pub const DEFAULT_API_URL: &str = "https://api.quotable.io/random";

/// Raw record as returned by the API
#[derive(Debug, Deserialize)]
struct ApiQuote {
    #[serde(rename = "_id")]
    underscore_id: Option<String>,
    id: Option<String>,
    content: Option<String>,
    author: Option<String>,
}

impl ApiQuote {
    fn into_quote(self, now_millis: i64) -> Result<Quote, FetchError> {
        let content = match self.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Err(FetchError::InvalidPayload("missing content".to_string())),
        };

        let id = self
            .underscore_id
            .or(self.id)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| now_millis.to_string());

        let author = self.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Ok(Quote::with_id(id, content, author))
    }
}

/// Fetches quotes over HTTP
pub struct HttpQuoteSource {
    client: Client,
    url: String,
}

impl HttpQuoteSource {
    /// Create a source for `url` with the given request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quote-moment/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch_random(&self) -> Result<Quote, FetchError> {
        tracing::debug!(url = %self.url, "Fetching random quote");

        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .map_err(|e| FetchError::Request {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let raw: ApiQuote = response
            .json()
            .map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

        raw.into_quote(chrono::Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Quote, FetchError> {
        serde_json::from_str::<ApiQuote>(json).unwrap().into_quote(1_700_000_000_000)
    }

    #[test]
    fn reads_quotable_record() {
        let quote =
            parse(r#"{"_id":"abc","content":"Be yourself","author":"Oscar Wilde","tags":[]}"#)
                .unwrap();

        assert_eq!(quote.id, "abc");
        assert_eq!(quote.content, "Be yourself");
        assert_eq!(quote.author, "Oscar Wilde");
    }

    #[test]
    fn accepts_plain_id_field() {
        let quote = parse(r#"{"id":"xyz","content":"Hello"}"#).unwrap();
        assert_eq!(quote.id, "xyz");
        assert_eq!(quote.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn missing_id_falls_back_to_timestamp() {
        let quote = parse(r#"{"content":"Hello","author":""}"#).unwrap();
        assert_eq!(quote.id, "1700000000000");
        assert_eq!(quote.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn blank_content_is_rejected() {
        let result = parse(r#"{"_id":"abc","content":"   "}"#);
        assert!(matches!(result, Err(FetchError::InvalidPayload(_))));
    }

    #[test]
    fn source_keeps_configured_url() {
        let source =
            HttpQuoteSource::new("http://localhost:9/random", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url(), "http://localhost:9/random");
    }
}
