//! Backend-service inventory for a project.
//!
//! # Responsibilities
//! - Fetch the aggregated backend-service list across every scope
//! - Keep named descriptors of the backend-service kind, drop everything else
//! - Group the survivors by region
//!
//! # Design Decisions
//! - Partial success is requested; unreachable scopes are logged, not fatal
//! - Rebuilt on every invocation, never cached
//! - Paging stops with an error on a repeated token or after `MAX_PAGES`

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::auth::AccessToken;
use crate::compute::types::BackendServicesScopedList;
use crate::compute::{BackendServiceAggregatedList, ComputeApi, ComputeError, Scope};

/// Scope warning emitted for every region without backend services.
const NO_RESULTS_ON_PAGE: &str = "NO_RESULTS_ON_PAGE";

/// Upper bound on aggregated-list pages fetched for one project.
pub const MAX_PAGES: usize = 100;

/// A monitorable backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendServiceRef {
    pub product_id: String,
    pub scope: Scope,
    pub name: String,
}

impl BackendServiceRef {
    pub fn region(&self) -> &str {
        self.scope.region()
    }
}

/// Backend services of one project, keyed by region. Iteration order is sorted.
pub type RegionMap = BTreeMap<String, Vec<BackendServiceRef>>;

/// Failure to build a project's catalog.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct CatalogError {
    pub project: String,
    #[source]
    pub source: ComputeError,
}

/// Builds `RegionMap`s from the aggregated list endpoint.
pub struct BackendServiceCatalog<'a> {
    api: &'a dyn ComputeApi,
}

impl<'a> BackendServiceCatalog<'a> {
    pub fn new(api: &'a dyn ComputeApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, token: &AccessToken, project: &str) -> Result<RegionMap, CatalogError> {
        let mut regions = RegionMap::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0;

        loop {
            pages += 1;
            let page = self
                .api
                .aggregated_backend_services(token, project, page_token.as_deref())
                .await
                .map_err(|source| CatalogError {
                    project: project.to_string(),
                    source,
                })?;

            report_partial_success(project, &page);
            collect_page(project, page.items, &mut regions);

            let Some(next) = page.next_page_token.filter(|t| !t.is_empty()) else {
                break;
            };
            let stuck = if !seen_tokens.insert(next.clone()) {
                Some(format!("page token '{next}' repeated"))
            } else if pages >= MAX_PAGES {
                Some(format!("more than {MAX_PAGES} pages"))
            } else {
                None
            };
            if let Some(reason) = stuck {
                return Err(CatalogError {
                    project: project.to_string(),
                    source: ComputeError::Pagination(reason),
                });
            }
            page_token = Some(next);
        }

        tracing::debug!(
            project,
            regions = regions.len(),
            services = regions.values().map(Vec::len).sum::<usize>(),
            "Backend service catalog built"
        );
        Ok(regions)
    }
}

fn collect_page(
    project: &str,
    items: BTreeMap<String, BackendServicesScopedList>,
    regions: &mut RegionMap,
) {
    for (scope_key, scoped) in items {
        let scope = Scope::from_scope_key(&scope_key);
        for descriptor in scoped.backend_services {
            if !descriptor.is_named_backend_service() {
                continue;
            }
            let Some(name) = descriptor.name else {
                continue;
            };
            regions
                .entry(scope.region().to_string())
                .or_default()
                .push(BackendServiceRef {
                    product_id: project.to_string(),
                    scope: scope.clone(),
                    name,
                });
        }
    }
}

fn report_partial_success(project: &str, page: &BackendServiceAggregatedList) {
    for unreachable in &page.unreachables {
        tracing::warn!(project, scope = %unreachable, "Scope unreachable, omitted from catalog");
    }
    if let Some(warning) = &page.warning {
        tracing::warn!(
            project,
            code = warning.code.as_deref().unwrap_or_default(),
            message = warning.message.as_deref().unwrap_or_default(),
            "Aggregated list returned a warning"
        );
    }
    for (scope_key, scoped) in &page.items {
        if let Some(warning) = &scoped.warning {
            if warning.code.as_deref() == Some(NO_RESULTS_ON_PAGE) {
                continue;
            }
            tracing::debug!(
                project,
                scope = %scope_key,
                code = warning.code.as_deref().unwrap_or_default(),
                message = warning.message.as_deref().unwrap_or_default(),
                "Scope warning"
            );
        }
    }
}
