use scrapilot::{EngineConfig, QueryEngine};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once per test binary; respects RUST_LOG.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[allow(dead_code)]
pub fn default_engine() -> QueryEngine {
    QueryEngine::with_mock(EngineConfig::default()).expect("failed to build engine")
}

#[allow(dead_code)]
pub fn short_timeout_engine() -> QueryEngine {
    let config = EngineConfig {
        session_timeout_secs: 1,
        sweep_interval_secs: 1,
        ..Default::default()
    };
    QueryEngine::with_mock(config).expect("failed to build engine")
}
