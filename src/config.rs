//! Configuration management for Scrapilot
//!
//! This module handles loading, parsing, and validating the engine
//! configuration from files or embedder-supplied values.

use crate::error::{Result, ScrapilotError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Engine configuration
///
/// Holds the tunable knobs of the query engine: session expiry, page
/// sizing for the mock provider, and the background sweep cadence.
/// Every field has a default matching the reference behavior, so an
/// embedder can start from `EngineConfig::default()` and override
/// selectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Idle time after which a session expires (seconds)
    ///
    /// The window is sliding: every processed message refreshes it.
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,

    /// Number of records one "page" of scraping yields
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,

    /// Hard cap on the page count a single query may request
    #[serde(default = "default_page_cap")]
    pub page_cap: usize,

    /// Interval between background expiry sweeps (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_session_timeout() -> u64 {
    600 // 10 minutes
}

fn default_records_per_page() -> usize {
    5
}

fn default_page_cap() -> usize {
    5
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: default_session_timeout(),
            records_per_page: default_records_per_page(),
            page_cap: default_page_cap(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ScrapilotError::Config` if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.session_timeout_secs == 0 {
            return Err(
                ScrapilotError::Config("session_timeout_secs must be greater than 0".to_string())
                    .into(),
            );
        }
        if self.records_per_page == 0 {
            return Err(
                ScrapilotError::Config("records_per_page must be greater than 0".to_string())
                    .into(),
            );
        }
        if self.page_cap == 0 {
            return Err(
                ScrapilotError::Config("page_cap must be greater than 0".to_string()).into(),
            );
        }
        if self.sweep_interval_secs == 0 {
            return Err(
                ScrapilotError::Config("sweep_interval_secs must be greater than 0".to_string())
                    .into(),
            );
        }
        Ok(())
    }

    /// Session expiry window as a `Duration`
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    /// Background sweep interval as a `Duration`
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.session_timeout_secs, 600);
        assert_eq!(config.records_per_page, 5);
        assert_eq!(config.page_cap, 5);
        assert_eq!(config.sweep_interval_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml_uses_defaults() {
        let config: EngineConfig = serde_yaml::from_str("session_timeout_secs: 30\n").unwrap();
        assert_eq!(config.session_timeout_secs, 30);
        assert_eq!(config.records_per_page, 5);
        assert_eq!(config.page_cap, 5);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
session_timeout_secs: 120
records_per_page: 10
page_cap: 3
sweep_interval_secs: 15
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.session_timeout_secs, 120);
        assert_eq!(config.records_per_page, 10);
        assert_eq!(config.page_cap, 3);
        assert_eq!(config.sweep_interval_secs, 15);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = EngineConfig {
            session_timeout_secs: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("session_timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = EngineConfig {
            records_per_page: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("records_per_page"));
    }

    #[test]
    fn test_validate_rejects_zero_page_cap() {
        let config = EngineConfig {
            page_cap: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page_cap"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().expect("failed to create tempdir");
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "session_timeout_secs: 45\npage_cap: 2\n")
            .expect("failed to write config file");

        let config = EngineConfig::load(&path).expect("failed to load config");
        assert_eq!(config.session_timeout_secs, 45);
        assert_eq!(config.page_cap, 2);
        assert_eq!(config.session_timeout(), Duration::from_secs(45));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = EngineConfig::load("/nonexistent/engine.yaml");
        assert!(result.is_err());
    }
}
