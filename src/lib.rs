//! Scrapilot - session-scoped conversational query engine
//!
//! This library implements the conversational core of a simulated
//! web-scraping assistant: session lifecycle with sliding expiry, intent
//! classification of free-text requests, a deterministic mock data
//! provider, and the query engine that orchestrates them into replies.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: session/message types and the expiring session store
//! - `intent`: free-text classification into scraping intents
//! - `provider`: the scrape-provider seam and the mock implementation
//! - `record`: the open (schema-on-read) scraped record type
//! - `engine`: the query engine and its canned reply phrases
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//!
//! # Example
//!
//! ```
//! use scrapilot::{EngineConfig, QueryEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = QueryEngine::with_mock(EngineConfig::default())?;
//!     let session_id = engine.create_session().await;
//!
//!     let reply = engine
//!         .process_message(&session_id, "get all breeders", Some("https://herefordsondemand.com/find-a-breeder/"))
//!         .await;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod intent;
pub mod provider;
pub mod record;
pub mod session;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{QueryEngine, Reply};
pub use error::{Result, ScrapilotError};
pub use intent::{classify, Intent};
pub use provider::{is_valid_url, MockScraper, ScrapeProvider};
pub use record::{export_json, table_columns, FieldValue, ScrapingResult};
pub use session::{Message, Role, Session, SessionStore};

#[cfg(test)]
pub mod test_utils;
