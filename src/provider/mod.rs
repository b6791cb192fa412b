//! Scrape provider abstraction
//!
//! This module defines the [`ScrapeProvider`] trait the query engine
//! consumes, the stand-in [`MockScraper`] implementation, and URL
//! validation for the presentation layer's submission gate.

pub mod mock;

pub use mock::MockScraper;

use crate::error::Result;
use crate::record::ScrapingResult;
use async_trait::async_trait;
use url::Url;

/// Source of scraped records for a target URL
///
/// The engine talks to providers exclusively through this trait so tests
/// can substitute failing or custom implementations. The operation is
/// asynchronous to honor the caller-facing contract; implementations are
/// not expected to have real latency.
#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    /// Produce the records a scrape of `url` across `pages` pages yields
    ///
    /// # Arguments
    ///
    /// * `url` - The target URL (already validated by the caller)
    /// * `pages` - Number of pages to fetch
    ///
    /// # Errors
    ///
    /// Returns an error if record synthesis fails. The engine converts
    /// any such error into a generic error reply.
    async fn scrape(&self, url: &str, pages: usize) -> Result<Vec<ScrapingResult>>;
}

/// Checks whether `text` is a syntactically valid URL
///
/// Standard URL parsing; a scheme and a host are both required. The
/// presentation layer calls this before forwarding a URL to the engine,
/// so invalid syntax never reaches a provider.
///
/// # Examples
///
/// ```
/// use scrapilot::provider::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/listings"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(text: &str) -> bool {
    Url::parse(text).map(|url| url.has_host()).unwrap_or(false)
}
