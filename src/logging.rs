//! # Structured Logging
//!
//! Tracing initialization for the consumer process. Output format and default
//! level come from [`LoggingConfig`]; a `RUST_LOG` directive in the
//! environment always wins over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// Uses `try_init` so repeated calls (tests, embedded use) are harmless:
/// if a subscriber is already installed the call is a no-op.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    if config.json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    }
}
