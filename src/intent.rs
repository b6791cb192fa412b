//! Intent classification for free-text scraping requests.
//!
//! This module maps a user message to a scraping intent: how many pages to
//! request, whether a location filter was asked for, and whether the user
//! wants a full retrieval. Classification is pure and total: unmatched
//! text falls through to defaults, and nothing here can fail.
//!
//! # Rule precedence
//!
//! Page-count rules live in a prioritized table evaluated in fixed order;
//! the first matching rule wins even when several phrasings co-occur in
//! the same message. This keeps precedence deterministic and testable in
//! isolation from the phrasing idiosyncrasies themselves.

use regex::Regex;
use std::sync::OnceLock;

/// Default page count when no phrasing matches
const DEFAULT_PAGES: usize = 1;

/// Page count for an explicit "page 1 until 3" style range
const EXPLICIT_RANGE_PAGES: usize = 3;

/// Safety cap applied when the user asks for everything
const FULL_RETRIEVAL_PAGES: usize = 5;

/// The classified purpose of a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Number of pages the query should fetch
    pub pages: usize,
    /// Requested location filter value (trimmed, upper-cased), if any
    pub location_filter: Option<String>,
    /// Whether the text asked for a full retrieval ("all"/"every"/"get")
    pub full_retrieval: bool,
}

fn wants_explicit_range(text: &str) -> bool {
    text.contains("page 1 until 3") || text.contains("from page 1")
}

fn wants_everything(text: &str) -> bool {
    text.contains("all") || text.contains("every")
}

/// Prioritized page-count rules, first match wins
const PAGE_RULES: [(fn(&str) -> bool, usize); 2] = [
    (wants_explicit_range, EXPLICIT_RANGE_PAGES),
    (wants_everything, FULL_RETRIEVAL_PAGES),
];

/// Loose pattern for extracting a location filter value
///
/// Looks for the word "location", optionally followed by a connector
/// (is/in/equals/contains or a colon), then captures the following word
/// sequence. The capture is deliberately greedy across spaces so that
/// multi-word values like "mott nd" come through whole.
fn location_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"location(?:\s+is|\s+in|\s+equals|\s+contains|\s*:\s*|\s+)?[\s:]*([\w\s]+)")
            .expect("location pattern is valid")
    })
}

/// Classify a user message into a scraping intent
///
/// The input is lower-cased internally; callers pass the message as typed.
///
/// # Arguments
///
/// * `text` - The free-text user message
///
/// # Examples
///
/// ```
/// use scrapilot::intent::classify;
///
/// let intent = classify("Get all breeders");
/// assert_eq!(intent.pages, 5);
/// assert!(intent.full_retrieval);
/// assert!(intent.location_filter.is_none());
/// ```
pub fn classify(text: &str) -> Intent {
    let text = text.to_lowercase();

    let pages = PAGE_RULES
        .iter()
        .find(|(matches, _)| matches(&text))
        .map(|(_, pages)| *pages)
        .unwrap_or(DEFAULT_PAGES);

    let location_filter = if text.contains("filter") && text.contains("location") {
        extract_location(&text)
    } else {
        None
    };

    let full_retrieval =
        text.contains("all") || text.contains("every") || text.contains("get");

    Intent {
        pages,
        location_filter,
        full_retrieval,
    }
}

/// Extract the location filter value from lower-cased text
///
/// Returns `None` when the pattern fails to capture anything non-empty:
/// a filter intent without a usable value applies no filtering.
fn extract_location(text: &str) -> Option<String> {
    let captures = location_pattern().captures(text)?;
    let value = captures.get(1)?.as_str().trim().to_uppercase();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
