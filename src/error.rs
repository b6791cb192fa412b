//! Error types for Scrapilot
//!
//! This module defines all error types used throughout the engine,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Scrapilot operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session lookup, provider execution, and
/// result serialization.
///
/// Note that `process_message` never surfaces any of these to its caller:
/// the query engine normalizes every failure into a reply with empty
/// results. The variants exist for embedders that call the lower-level
/// pieces directly.
#[derive(Error, Debug)]
pub enum ScrapilotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (mock data synthesis failures)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The supplied text is not a syntactically valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A session lookup failed for the given identifier
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The identifier that could not be resolved
        id: String,
    },

    /// IO errors (configuration file reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Scrapilot operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
