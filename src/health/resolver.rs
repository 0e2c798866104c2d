//! Two-step health resolution for one backend service.
//!
//! # Responsibilities
//! - Resolve the backend service to its first instance group
//! - Ask the backend service for the health of that group
//!
//! # Design Decisions
//! - getHealth takes an instance-group reference, not a service name, hence the
//!   descriptor lookup first
//! - Only `backends[0]` is consulted
//! - A descriptor failure is fatal; a getHealth failure is reported only

use thiserror::Error;

use crate::auth::AccessToken;
use crate::compute::{ComputeApi, ComputeError, HealthReport, Scope};

/// Errors raised while resolving the health of a backend service.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The backend-service descriptor could not be fetched.
    #[error("{0}")]
    Descriptor(#[source] ComputeError),

    /// The descriptor lists no backends, so there is no group to query.
    #[error("backend service '{name}' has no backends")]
    NoBackends { name: String },

    /// The first backend carries no instance-group reference.
    #[error("first backend of '{name}' has no instance group")]
    MissingGroup { name: String },

    /// getHealth failed after the group was resolved.
    #[error("{0}")]
    Health(#[source] ComputeError),
}

impl ResolveError {
    /// Whether the failure should end the process with a non-zero status.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ResolveError::Health(_))
    }
}

/// A backend service addressed for a health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub scope: Scope,
    pub name: String,
}

impl ServiceTarget {
    pub fn new(scope: Scope, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }
}

/// Runs the descriptor → getHealth protocol against a compute API.
pub struct HealthResolver<'a> {
    api: &'a dyn ComputeApi,
}

impl<'a> HealthResolver<'a> {
    pub fn new(api: &'a dyn ComputeApi) -> Self {
        Self { api }
    }

    pub async fn resolve(
        &self,
        token: &AccessToken,
        project: &str,
        scope: &Scope,
        name: &str,
    ) -> Result<HealthReport, ResolveError> {
        let descriptor = self
            .api
            .backend_service(token, project, scope, name)
            .await
            .map_err(ResolveError::Descriptor)?;

        let backend = descriptor
            .backends
            .first()
            .ok_or_else(|| ResolveError::NoBackends {
                name: name.to_string(),
            })?;
        let group = backend
            .group
            .as_deref()
            .filter(|group| !group.is_empty())
            .ok_or_else(|| ResolveError::MissingGroup {
                name: name.to_string(),
            })?;

        if descriptor.backends.len() > 1 {
            tracing::debug!(
                name,
                backends = descriptor.backends.len(),
                "Only the first backend group is checked"
            );
        }

        let report = self
            .api
            .backend_service_health(token, project, scope, name, group)
            .await
            .map_err(ResolveError::Health)?;

        tracing::debug!(
            project,
            scope = %scope,
            name,
            instances = report.records.len(),
            "Resolved backend health"
        );
        Ok(report)
    }

    /// Resolve several services in sequence. Every target gets its own result.
    pub async fn resolve_each(
        &self,
        token: &AccessToken,
        project: &str,
        targets: &[ServiceTarget],
    ) -> Vec<(ServiceTarget, Result<HealthReport, ResolveError>)> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            let result = self
                .resolve(token, project, &target.scope, &target.name)
                .await;
            if let Err(e) = &result {
                tracing::warn!(
                    project,
                    scope = %target.scope,
                    name = %target.name,
                    error = %e,
                    "Health resolution failed"
                );
            }
            results.push((target.clone(), result));
        }
        results
    }
}
