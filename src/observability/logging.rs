//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter(config: &ObservabilityConfig) -> String {
    let level = config.log_level.to_ascii_lowercase();
    format!("auth_converter={level},tower_http={level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `observability.log_level`.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
