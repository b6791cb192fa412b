//! Test utilities for Scrapilot
//!
//! Providers with canned failure modes and configuration presets shared
//! by the unit tests.

use crate::config::EngineConfig;
use crate::error::{Result, ScrapilotError};
use crate::provider::ScrapeProvider;
use crate::record::ScrapingResult;
use async_trait::async_trait;

/// Provider that always fails, for exercising the error-reply path
pub struct FailingProvider;

#[async_trait]
impl ScrapeProvider for FailingProvider {
    async fn scrape(&self, _url: &str, _pages: usize) -> Result<Vec<ScrapingResult>> {
        Err(ScrapilotError::Provider("synthetic failure".to_string()).into())
    }
}

/// Provider that always returns an empty record set
pub struct EmptyProvider;

#[async_trait]
impl ScrapeProvider for EmptyProvider {
    async fn scrape(&self, _url: &str, _pages: usize) -> Result<Vec<ScrapingResult>> {
        Ok(Vec::new())
    }
}

/// Configuration with the shortest expressible expiry, for expiry tests
pub fn short_timeout_config() -> EngineConfig {
    EngineConfig {
        session_timeout_secs: 1,
        sweep_interval_secs: 1,
        ..Default::default()
    }
}
