//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Resolve the log filter from environment, config and `--debug`
//!
//! # Design Decisions
//! - Logs go to stderr; stdout carries only the monitoring payload
//! - `RUST_LOG` overrides everything else

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

const CRATE_TARGET: &str = "lb_health_check";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(config: &ObservabilityConfig, verbose: bool) -> String {
    let level = config.log_level.to_ascii_lowercase();
    if verbose {
        format!("{level},{CRATE_TARGET}=debug")
    } else {
        level
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &ObservabilityConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json = config.json_logs, verbose, "Logging initialized");
    }
}
