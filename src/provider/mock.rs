//! Mock scrape provider
//!
//! Stands in for a real scraper: no network access, deterministic output.
//! URLs matching the demo breeder directory return slices of a fixed
//! 25-record table; any other URL yields synthesized placeholder records
//! derived from the URL's hostname and a running index.

use super::ScrapeProvider;
use crate::error::Result;
use crate::record::ScrapingResult;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Default number of records one page yields
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Fixed demo dataset: hereford breeder directory entries.
///
/// (name, location, phone, herd_size). Locations are upper-case
/// city/state pairs; several share "MOTT ND" so location filtering has
/// something to match.
const BREEDER_ROWS: [(&str, &str, &str, u64); 25] = [
    ("Anderson Hereford Ranch", "MOTT ND", "701-555-0142", 220),
    ("Bar Arrow Cattle Co", "PHILLIPSBURG KS", "785-555-0163", 180),
    ("Beery Land & Livestock", "VIDA MT", "406-555-0117", 340),
    ("Churchill Cattle Co", "MANHATTAN MT", "406-555-0128", 410),
    ("Cooper Herefords", "WILLOW CREEK MT", "406-555-0185", 260),
    ("Dakota Hills Herefords", "MOTT ND", "701-555-0196", 150),
    ("Delaney Herefords", "LAKE BENTON MN", "507-555-0104", 95),
    ("Ellison Polled Herefords", "CLEVELAND ND", "701-555-0139", 130),
    ("Fawcett Elm Creek Ranch", "REE HEIGHTS SD", "605-555-0171", 290),
    ("Friedt Herefords", "MOTT ND", "701-555-0122", 175),
    ("Glacier View Ranch", "CUT BANK MT", "406-555-0148", 205),
    ("Hoffman Herefords", "THEDFORD NE", "308-555-0156", 320),
    ("Holden Herefords", "VALIER MT", "406-555-0110", 500),
    ("J Bar E Ranch", "PLENTYWOOD MT", "406-555-0193", 145),
    ("K7 Herefords", "ELLSWORTH KS", "785-555-0168", 110),
    ("Knippling Bros Herefords", "GANN VALLEY SD", "605-555-0125", 230),
    ("Lamport Herefords", "QUINN SD", "605-555-0187", 160),
    ("McKean Brothers", "MERCER PA", "724-555-0132", 85),
    ("Ned Ward Ranch", "SHERIDAN WY", "307-555-0179", 270),
    ("Olsen Ranches", "HARRISBURG NE", "308-555-0141", 450),
    ("Pelton Polled Herefords", "BURDETTE SD", "605-555-0150", 190),
    ("Rausch Herefords", "HOVEN SD", "605-555-0114", 600),
    ("Stuber Ranch", "BOWMAN ND", "701-555-0167", 380),
    ("Topp Herefords", "GRACE CITY ND", "701-555-0108", 420),
    ("Upstream Ranch", "TAYLOR NE", "308-555-0174", 240),
];

/// Deterministic stand-in for a real web scraper
///
/// # Examples
///
/// ```
/// use scrapilot::provider::{MockScraper, ScrapeProvider};
///
/// # tokio_test::block_on(async {
/// let scraper = MockScraper::default();
/// let records = scraper
///     .scrape("https://herefordsondemand.com/find-a-breeder/", 2)
///     .await
///     .unwrap();
/// assert_eq!(records.len(), 10);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockScraper {
    page_size: usize,
}

impl Default for MockScraper {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MockScraper {
    /// Creates a scraper yielding `page_size` records per page
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Synthesizes generic placeholder records for a non-demo URL
    fn placeholder_records(&self, url: &str, count: usize) -> Vec<ScrapingResult> {
        let host = host_of(url);
        (0..count)
            .map(|index| {
                let ordinal = index + 1;
                let page = index / self.page_size + 1;
                let mut record = ScrapingResult::new();
                record.insert("title", format!("Listing {} from {}", ordinal, host));
                record.insert("url", format!("https://{}/listing/{}", host, ordinal));
                record.insert(
                    "description",
                    format!("Placeholder content extracted from {} (record {})", host, ordinal),
                );
                record.insert("page", page);
                record
            })
            .collect()
    }
}

#[async_trait]
impl ScrapeProvider for MockScraper {
    async fn scrape(&self, url: &str, pages: usize) -> Result<Vec<ScrapingResult>> {
        let requested = pages.saturating_mul(self.page_size);
        debug!(url, pages, requested, "scraping");

        if is_demo_url(url) {
            Ok(breeder_records(requested))
        } else {
            Ok(self.placeholder_records(url, requested))
        }
    }
}

/// Returns true if `url` points at the known demo breeder directory
fn is_demo_url(url: &str) -> bool {
    let url = url.to_lowercase();
    url.contains("breeder") || url.contains("herefordsondemand")
}

/// First `count` rows of the canned breeder table, capped at its length
fn breeder_records(count: usize) -> Vec<ScrapingResult> {
    BREEDER_ROWS
        .iter()
        .take(count)
        .map(|(name, location, phone, herd_size)| {
            let mut record = ScrapingResult::new();
            record.insert("name", *name);
            record.insert("location", *location);
            record.insert("phone", *phone);
            record.insert("herd_size", *herd_size);
            record
        })
        .collect()
}

/// Hostname of `url`, falling back to the raw input when parsing fails
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.trim().to_string())
}
