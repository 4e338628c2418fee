//! # Observability Infrastructure
//!
//! Structured logging for secretkeeper. Operation counters are emitted through
//! the `metrics` facade and are no-ops until the embedding service installs a
//! recorder.

pub mod logging;

pub use logging::log_config_info;

use crate::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is harmless: the first subscriber stays installed.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let installed = if config.json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
    };

    if installed {
        tracing::debug!(
            service_name = %config.service_name,
            json_logging = config.json_logging,
            "Logging initialized"
        );
    }
}
