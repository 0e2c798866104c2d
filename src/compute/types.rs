//! Compute API response shapes and error definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `kind` tag carried by backend-service descriptors.
pub const BACKEND_SERVICE_KIND: &str = "compute#backendService";

/// Errors returned by the compute API client.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// Provider answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Request never produced a response (connect failure, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request URL could not be built from the configured base URL.
    #[error("invalid request URL: {0}")]
    Url(String),

    /// Page tokens repeated or never ran out.
    #[error("pagination did not terminate: {0}")]
    Pagination(String),
}

/// Result type for compute API calls.
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Error body attached to non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    pub code: Option<u16>,
    pub message: Option<String>,
}

/// Warning attached to a partial-success response or an empty scope.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiWarning {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Response of `aggregated/backendServices`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendServiceAggregatedList {
    /// Keyed by scope (`"global"`, `"regions/europe-west1"`).
    pub items: BTreeMap<String, BackendServicesScopedList>,
    pub next_page_token: Option<String>,
    /// Scopes the provider could not reach under partial-success semantics.
    pub unreachables: Vec<String>,
    pub warning: Option<ApiWarning>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendServicesScopedList {
    pub backend_services: Vec<BackendServiceDescriptor>,
    pub warning: Option<ApiWarning>,
}

/// The subset of a backend-service resource this tool reads.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendServiceDescriptor {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub backends: Vec<Backend>,
}

impl BackendServiceDescriptor {
    /// True for descriptors of the backend-service type with a non-empty name.
    pub fn is_named_backend_service(&self) -> bool {
        self.kind.as_deref() == Some(BACKEND_SERVICE_KIND)
            && self.name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Backend {
    /// Instance-group reference URL.
    pub group: Option<String>,
}

/// Body of a `getHealth` request.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceGroupReference<'a> {
    pub group: &'a str,
}

/// Response of `backendServices/{name}/getHealth`.
///
/// The provider omits `healthStatus` entirely when no instance reports.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendServiceGroupHealth {
    pub health_status: Vec<HealthRecord>,
}

/// Health of one instance behind a backend service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthRecord {
    pub health_state: HealthState,
    pub instance: Option<String>,
    pub ip_address: Option<String>,
    pub port: Option<u16>,
}

impl HealthRecord {
    pub fn with_state(health_state: HealthState) -> Self {
        Self {
            health_state,
            ..Self::default()
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.health_state == HealthState::Healthy
    }
}

/// Per-instance health state. Only `Healthy` counts as healthy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthState {
    Healthy,
    Unhealthy,
    Draining,
    Timeout,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Parsed health records plus the provider's response as received.
///
/// `raw` keeps the provider's key order, so serializing it reproduces a
/// compact response byte for byte.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub records: Vec<HealthRecord>,
    pub raw: serde_json::Value,
}

impl HealthReport {
    pub fn from_raw(raw: serde_json::Value) -> ComputeResult<Self> {
        let parsed: BackendServiceGroupHealth = serde_json::from_value(raw.clone())?;
        Ok(Self {
            records: parsed.health_status,
            raw,
        })
    }
}
