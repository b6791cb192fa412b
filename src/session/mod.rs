//! Session types and the expiring session store
//!
//! A session is one conversational context: the ordered message history,
//! the accumulated scraping results, and the currently targeted URL.
//! Sessions are owned exclusively by the [`SessionStore`] and mutated only
//! through the query engine.

pub mod store;

pub use store::SessionStore;

use crate::record::ScrapingResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier
    pub id: String,
    /// Who authored the message
    pub role: Role,
    /// Text content
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Ephemeral presentation flag for an in-flight assistant reply.
    /// Loading placeholders are never stored in a session's history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,
}

impl Message {
    /// Creates a user message
    ///
    /// # Examples
    ///
    /// ```
    /// use scrapilot::session::{Message, Role};
    ///
    /// let msg = Message::user("get all breeders");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            is_loading: None,
        }
    }

    /// Creates an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            is_loading: None,
        }
    }

    /// Creates an empty assistant placeholder shown while a reply is
    /// in flight
    pub fn loading() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: String::new(),
            timestamp: Utc::now(),
            is_loading: Some(true),
        }
    }
}

/// One conversational context scoped to a single presentation-layer mount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique identifier
    pub id: String,
    /// Message history, append-only within the session's lifetime
    pub messages: Vec<Message>,
    /// Union of all query results returned so far, append-only
    pub results: Vec<ScrapingResult>,
    /// Currently targeted URL, if one has been set
    pub current_url: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session under the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            results: Vec::new(),
            current_url: None,
            created_at: Utc::now(),
        }
    }

    /// Appends a message to the history
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Unions a query's results into the accumulated set
    pub fn add_results(&mut self, results: impl IntoIterator<Item = ScrapingResult>) {
        self.results.extend(results);
    }

    /// Number of messages in the history
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// The most recent message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
