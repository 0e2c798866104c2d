//! Compute API client.
//!
//! # Responsibilities
//! - Build project-scoped URLs for backend-service resources
//! - Attach bearer credentials to every request
//! - Turn non-success responses into errors carrying the provider's message
//!
//! # Design Decisions
//! - No retries: the monitoring scheduler re-invokes on its own cadence
//! - Timeouts belong to the HTTP client; a timeout is just another error

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::AccessToken;
use crate::compute::scope::Scope;
use crate::compute::types::{
    ApiErrorBody, ApiErrorDetail, BackendServiceAggregatedList, BackendServiceDescriptor,
    ComputeError, ComputeResult, HealthReport, ResourceGroupReference,
};
use crate::config::ApiConfig;

/// Read-only operations the core needs from the compute API.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// One page of `aggregated/backendServices` for a project.
    async fn aggregated_backend_services(
        &self,
        token: &AccessToken,
        project: &str,
        page_token: Option<&str>,
    ) -> ComputeResult<BackendServiceAggregatedList>;

    /// A single backend-service descriptor.
    async fn backend_service(
        &self,
        token: &AccessToken,
        project: &str,
        scope: &Scope,
        name: &str,
    ) -> ComputeResult<BackendServiceDescriptor>;

    /// Health of the instances in `group` as seen by the backend service.
    async fn backend_service_health(
        &self,
        token: &AccessToken,
        project: &str,
        scope: &Scope,
        name: &str,
        group: &str,
    ) -> ComputeResult<HealthReport>;
}

/// reqwest-backed client for the compute REST API.
#[derive(Debug, Clone)]
pub struct ComputeClient {
    http: reqwest::Client,
    base_url: Url,
    max_results: u32,
}

impl ComputeClient {
    pub fn new(config: &ApiConfig) -> ComputeResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ComputeError::Url(format!("'{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ComputeError::Url(format!(
                "'{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url,
            max_results: config.max_results,
        })
    }

    fn project_url(&self, project: &str, segments: &[&str]) -> ComputeResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ComputeError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .push("projects")
            .push(project)
            .extend(segments);
        url.query_pairs_mut().append_pair("alt", "json");
        Ok(url)
    }

    fn backend_service_url(
        &self,
        project: &str,
        scope: &Scope,
        name: &str,
        action: Option<&str>,
    ) -> ComputeResult<Url> {
        let mut segments = scope.path_segments();
        segments.push("backendServices");
        segments.push(name);
        segments.extend(action);
        self.project_url(project, &segments)
    }

    /// Send a request and return the body of a successful response.
    async fn execute(&self, token: &AccessToken, request: RequestBuilder) -> ComputeResult<String> {
        let response = request
            .bearer_auth(token.secret())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ComputeError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &AccessToken, url: Url) -> ComputeResult<T> {
        let body = self.execute(token, self.http.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ComputeApi for ComputeClient {
    async fn aggregated_backend_services(
        &self,
        token: &AccessToken,
        project: &str,
        page_token: Option<&str>,
    ) -> ComputeResult<BackendServiceAggregatedList> {
        let mut url = self.project_url(project, &["aggregated", "backendServices"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("includeAllScopes", "true")
                .append_pair("maxResults", &self.max_results.to_string())
                .append_pair("returnPartialSuccess", "true");
            if let Some(page_token) = page_token {
                query.append_pair("pageToken", page_token);
            }
        }

        tracing::debug!(project, paged = page_token.is_some(), "Listing backend services");
        self.get_json(token, url).await
    }

    async fn backend_service(
        &self,
        token: &AccessToken,
        project: &str,
        scope: &Scope,
        name: &str,
    ) -> ComputeResult<BackendServiceDescriptor> {
        let url = self.backend_service_url(project, scope, name, None)?;
        tracing::debug!(project, scope = %scope, name, "Fetching backend service");
        self.get_json(token, url).await
    }

    async fn backend_service_health(
        &self,
        token: &AccessToken,
        project: &str,
        scope: &Scope,
        name: &str,
        group: &str,
    ) -> ComputeResult<HealthReport> {
        let url = self.backend_service_url(project, scope, name, Some("getHealth"))?;
        tracing::debug!(project, scope = %scope, name, group, "Fetching backend health");

        let request = self.http.post(url).json(&ResourceGroupReference { group });
        let body = self.execute(token, request).await?;
        HealthReport::from_raw(serde_json::from_str(&body)?)
    }
}

/// Best available message for a failed response.
///
/// Only the provider's JSON error message is trusted; anything else (proxy
/// HTML pages, plain text) collapses to the status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            error:
                ApiErrorDetail {
                    message: Some(message),
                    ..
                },
        }) if !message.trim().is_empty() => message,
        _ => {
            if !body.trim().is_empty() {
                tracing::debug!(
                    status = status.as_u16(),
                    body_len = body.len(),
                    "Error response carried no provider message"
                );
            }
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        }
    }
}
