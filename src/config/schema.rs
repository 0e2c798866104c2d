//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an absent file or an empty one is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default compute API root.
pub const DEFAULT_BASE_URL: &str = "https://compute.googleapis.com/compute/v1";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Compute API client settings.
    pub api: ApiConfig,

    /// Credential settings.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Compute API client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without the `projects/...` suffix.
    pub base_url: String,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Page size for the aggregated backend-service list (provider max: 500).
    pub max_results: u32,

    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_results: 500,
            user_agent: concat!("lb-health-check/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Credential configuration. Command-line flags take precedence.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// gcloud executable used to activate key files.
    pub gcloud_path: PathBuf,

    /// Service-account key file.
    pub key_file: Option<PathBuf>,

    /// Pre-obtained bearer token.
    pub token: Option<String>,

    /// Limit on each gcloud invocation, in seconds.
    pub command_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            gcloud_path: PathBuf::from("gcloud"),
            key_file: None,
            token: None,
            command_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}
