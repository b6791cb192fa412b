//! Query engine implementation
//!
//! The engine orchestrates one message round trip: resolve (or mint) the
//! session, record the user message, classify the text, fetch records from
//! the scrape provider, filter, accumulate, and compose the reply.
//!
//! `process_message` never fails from the caller's point of view; every
//! failure mode is normalized into a reply with empty results.

use crate::config::EngineConfig;
use crate::engine::phrases;
use crate::error::Result;
use crate::intent::classify;
use crate::provider::{MockScraper, ScrapeProvider};
use crate::record::ScrapingResult;
use crate::session::{Message, Session, SessionStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// The engine's answer to one processed message
#[derive(Debug, Clone)]
pub struct Reply {
    /// Assistant reply text
    pub text: String,
    /// Records produced by this call (after any filtering)
    pub results: Vec<ScrapingResult>,
    /// Identifier of the session the reply belongs to. Differs from the
    /// identifier the caller sent when that one was stale or unknown.
    pub session_id: String,
}

/// Session-scoped conversational query engine
///
/// Owns the session store and a scrape provider. Construct one instance at
/// application start and hand it by reference to whatever consumes it;
/// tests build isolated instances freely.
///
/// # Examples
///
/// ```
/// use scrapilot::config::EngineConfig;
/// use scrapilot::engine::QueryEngine;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let engine = QueryEngine::with_mock(EngineConfig::default())?;
/// let session_id = engine.create_session().await;
///
/// let reply = engine
///     .process_message(&session_id, "get all breeders", Some("https://herefordsondemand.com/find-a-breeder/"))
///     .await;
/// assert!(!reply.results.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct QueryEngine {
    store: Arc<Mutex<SessionStore>>,
    provider: Arc<dyn ScrapeProvider>,
    config: EngineConfig,
}

impl QueryEngine {
    /// Creates an engine over the given provider
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration
    /// * `provider` - Source of scraped records
    ///
    /// # Errors
    ///
    /// Returns `ScrapilotError::Config` if configuration validation fails.
    pub fn new(config: EngineConfig, provider: Arc<dyn ScrapeProvider>) -> Result<Self> {
        config.validate()?;

        let store = SessionStore::new(config.session_timeout());
        info!(
            timeout_secs = config.session_timeout_secs,
            page_cap = config.page_cap,
            "query engine initialized"
        );

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            provider,
            config,
        })
    }

    /// Creates an engine backed by the built-in [`MockScraper`]
    ///
    /// # Errors
    ///
    /// Returns `ScrapilotError::Config` if configuration validation fails.
    pub fn with_mock(config: EngineConfig) -> Result<Self> {
        let provider = Arc::new(MockScraper::new(config.records_per_page));
        Self::new(config, provider)
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Greeting the presentation layer shows when a conversation starts
    pub fn welcome_message(&self) -> &'static str {
        phrases::WELCOME
    }

    /// Mints a new empty session and returns its identifier
    ///
    /// Called once per presentation-layer mount.
    pub async fn create_session(&self) -> String {
        self.store.lock().await.create()
    }

    /// A point-in-time copy of a session, for rendering history
    ///
    /// Does not refresh the session's expiry window. Returns `None` for
    /// unknown or expired identifiers.
    pub async fn session_snapshot(&self, session_id: &str) -> Option<Session> {
        self.store.lock().await.get(session_id).cloned()
    }

    /// Processes one user message and returns the reply
    ///
    /// Resolves the session (minting a fresh one when `session_id` is
    /// stale or unknown), adopts `url` as the session's target when
    /// supplied (last write wins), appends the user message, runs the
    /// query pipeline, accumulates results, and appends the assistant
    /// message. The whole mutation is atomic with respect to other calls:
    /// the store lock is held for the duration of the call.
    ///
    /// Never returns an error; provider failures become the generic error
    /// reply with empty results.
    pub async fn process_message(
        &self,
        session_id: &str,
        text: &str,
        url: Option<&str>,
    ) -> Reply {
        let mut store = self.store.lock().await;

        // Explicit touch keeps the expiry window sliding on every access.
        let sid = if store.touch(session_id) {
            session_id.to_string()
        } else {
            let fresh = store.create();
            warn!(
                stale_id = %session_id,
                new_id = %fresh,
                "session not found or expired, starting a new one"
            );
            fresh
        };

        let mut target = None;
        if let Some(session) = store.get_mut(&sid) {
            if let Some(url) = url {
                session.current_url = Some(url.to_string());
            }
            session.push_message(Message::user(text));
            target = session.current_url.clone();
        }

        let (reply_text, results) = match target {
            None => (phrases::NO_URL.to_string(), Vec::new()),
            Some(target_url) => self.run_query(&target_url, text).await,
        };

        if let Some(session) = store.get_mut(&sid) {
            if !results.is_empty() {
                session.add_results(results.iter().cloned());
            }
            session.push_message(Message::assistant(reply_text.clone()));
        }

        Reply {
            text: reply_text,
            results,
            session_id: sid,
        }
    }

    /// Classify, fetch, filter, and pick the reply phrasing
    async fn run_query(&self, url: &str, text: &str) -> (String, Vec<ScrapingResult>) {
        let intent = classify(text);
        let pages = intent.pages.min(self.config.page_cap);
        debug!(url, pages, "running scrape query");

        let scraped = match self.provider.scrape(url, pages).await {
            Ok(records) => records,
            Err(error) => {
                error!(%error, url, "provider failed");
                return (phrases::PROCESSING_ERROR.to_string(), Vec::new());
            }
        };

        // An empty retrieval has its own phrase and overrides everything
        // else, filter intent included.
        if scraped.is_empty() {
            return (phrases::NO_DATA.to_string(), Vec::new());
        }

        match intent.location_filter {
            Some(location) => {
                let filtered = filter_by_location(scraped, &location);
                (phrases::filtered_ack(&location), filtered)
            }
            None if intent.full_retrieval => (phrases::full_retrieval_ack(url), scraped),
            None => (phrases::generic_ack(url), scraped),
        }
    }

    /// Spawns the background expiry sweep
    ///
    /// The sweep fires independently of in-flight calls every
    /// `sweep_interval`, evicting sessions that expired without being
    /// accessed again. Abort the returned handle to stop it.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let interval = self.config.sweep_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.lock().await.sweep();
                if evicted > 0 {
                    debug!(evicted, "background sweep evicted sessions");
                }
            }
        })
    }
}

/// Keeps records whose location field contains `location` (upper-cased
/// comparison on the rendered value)
fn filter_by_location(records: Vec<ScrapingResult>, location: &str) -> Vec<ScrapingResult> {
    records
        .into_iter()
        .filter(|record| {
            record
                .get("location")
                .map(|value| value.to_string().to_uppercase().contains(location))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use crate::session::Role;
    use crate::test_utils::{short_timeout_config, EmptyProvider, FailingProvider};

    const BREEDER_URL: &str = "https://herefordsondemand.com/find-a-breeder/";

    fn mock_engine() -> QueryEngine {
        QueryEngine::with_mock(EngineConfig::default()).expect("failed to build engine")
    }

    #[tokio::test]
    async fn test_query_without_url_short_circuits() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        let reply = engine.process_message(&session_id, "get all data", None).await;

        assert_eq!(reply.text, phrases::NO_URL);
        assert!(reply.results.is_empty());
        assert_eq!(reply.session_id, session_id);

        // Both the user message and the short-circuit reply are recorded.
        let session = engine.session_snapshot(&session_id).await.unwrap();
        assert_eq!(session.message_count(), 2);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[1].role, Role::Assistant);
        assert_eq!(session.messages[1].content, phrases::NO_URL);
    }

    #[tokio::test]
    async fn test_get_all_breeders_returns_full_table() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        let reply = engine
            .process_message(&session_id, "get all breeders", Some(BREEDER_URL))
            .await;

        // pages=5 at 5 records per page, capped at the 25-row table.
        assert_eq!(reply.results.len(), 25);
        assert_eq!(reply.text, phrases::full_retrieval_ack(BREEDER_URL));
    }

    #[tokio::test]
    async fn test_location_filter_keeps_matching_records_only() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        let reply = engine
            .process_message(
                &session_id,
                "get all breeders and filter results by location MOTT ND",
                Some(BREEDER_URL),
            )
            .await;

        assert_eq!(reply.text, phrases::filtered_ack("MOTT ND"));
        assert!(!reply.results.is_empty());
        for record in &reply.results {
            let location = record.get("location").and_then(FieldValue::as_text).unwrap();
            assert!(location.contains("MOTT ND"));
        }
    }

    #[tokio::test]
    async fn test_filter_phrase_wins_over_full_retrieval_phrase() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        let reply = engine
            .process_message(
                &session_id,
                "get all and filter by location MOTT ND",
                Some(BREEDER_URL),
            )
            .await;

        assert_eq!(reply.text, phrases::filtered_ack("MOTT ND"));
    }

    #[tokio::test]
    async fn test_url_adoption_is_last_write_wins() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        engine
            .process_message(&session_id, "scrape this", Some("https://example.com/a"))
            .await;
        let reply = engine
            .process_message(&session_id, "scrape this", Some("https://example.com/b"))
            .await;

        assert_eq!(reply.text, phrases::generic_ack("https://example.com/b"));

        let session = engine.session_snapshot(&session_id).await.unwrap();
        assert_eq!(session.current_url.as_deref(), Some("https://example.com/b"));
    }

    #[tokio::test]
    async fn test_session_url_persists_across_calls() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        engine
            .process_message(&session_id, "scrape this", Some("https://example.com/products"))
            .await;
        // Second call supplies no URL; the session's current target is used.
        let reply = engine.process_message(&session_id, "show me more", None).await;

        assert_eq!(reply.results.len(), 5);
        assert_eq!(reply.text, phrases::generic_ack("https://example.com/products"));
    }

    #[tokio::test]
    async fn test_message_history_grows_two_per_call() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        for calls in 1..=3 {
            engine
                .process_message(&session_id, "get data", Some("https://example.com"))
                .await;
            let session = engine.session_snapshot(&session_id).await.unwrap();
            assert_eq!(session.message_count(), 2 * calls);
        }
    }

    #[tokio::test]
    async fn test_results_accumulate_across_calls() {
        let engine = mock_engine();
        let session_id = engine.create_session().await;

        engine
            .process_message(&session_id, "scrape it", Some("https://example.com"))
            .await;
        let after_first = engine
            .session_snapshot(&session_id)
            .await
            .unwrap()
            .results
            .len();

        engine.process_message(&session_id, "scrape it again", None).await;
        let after_second = engine
            .session_snapshot(&session_id)
            .await
            .unwrap()
            .results
            .len();

        assert_eq!(after_first, 5);
        assert_eq!(after_second, 10);
    }

    #[tokio::test]
    async fn test_stale_session_id_mints_a_replacement() {
        let engine = mock_engine();

        let reply = engine
            .process_message("no-such-session", "hello", Some("https://example.com"))
            .await;

        assert_ne!(reply.session_id, "no-such-session");
        assert!(engine.session_snapshot(&reply.session_id).await.is_some());
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_error_reply() {
        let engine = QueryEngine::new(
            EngineConfig::default(),
            Arc::new(FailingProvider),
        )
        .expect("failed to build engine");
        let session_id = engine.create_session().await;

        let reply = engine
            .process_message(&session_id, "get everything", Some("https://example.com"))
            .await;

        assert_eq!(reply.text, phrases::PROCESSING_ERROR);
        assert!(reply.results.is_empty());

        // The failed call still records its message pair.
        let session = engine.session_snapshot(&session_id).await.unwrap();
        assert_eq!(session.message_count(), 2);
        assert!(session.results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_retrieval_gets_no_data_phrase() {
        let engine = QueryEngine::new(
            EngineConfig::default(),
            Arc::new(EmptyProvider),
        )
        .expect("failed to build engine");
        let session_id = engine.create_session().await;

        let reply = engine
            .process_message(
                &session_id,
                "get all and filter by location MOTT ND",
                Some("https://example.com"),
            )
            .await;

        // Empty-before-filtering overrides the filter and retrieval phrases.
        assert_eq!(reply.text, phrases::NO_DATA);
        assert!(reply.results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            page_cap: 0,
            ..Default::default()
        };
        assert!(QueryEngine::with_mock(config).is_err());
    }

    #[tokio::test]
    async fn test_welcome_message_is_fixed() {
        let engine = mock_engine();
        assert_eq!(engine.welcome_message(), phrases::WELCOME);
    }

    #[tokio::test]
    async fn test_snapshot_of_unknown_session_is_none() {
        let engine = mock_engine();
        assert!(engine.session_snapshot("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_sweeper_evicts_expired_sessions() {
        let engine = QueryEngine::with_mock(short_timeout_config()).expect("failed to build engine");
        let session_id = engine.create_session().await;

        let sweeper = engine.spawn_sweeper();
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

        assert!(engine.session_snapshot(&session_id).await.is_none());
        sweeper.abort();
    }
}
