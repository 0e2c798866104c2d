//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page size within provider limits)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// Largest page the aggregated list endpoint accepts.
pub const MAX_RESULTS_LIMIT: u32 = 500;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.base_url '{0}' is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("{field} must be greater than 0")]
    ZeroTimeout { field: &'static str },

    #[error("api.max_results must be between 1 and 500, got {0}")]
    MaxResultsOutOfRange(u32),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.api.base_url.clone())),
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "api.request_timeout_secs",
        });
    }
    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "api.connect_timeout_secs",
        });
    }

    if config.auth.command_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "auth.command_timeout_secs",
        });
    }

    if !(1..=MAX_RESULTS_LIMIT).contains(&config.api.max_results) {
        errors.push(ValidationError::MaxResultsOutOfRange(config.api.max_results));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
