//! Backend-service discovery.
//!
//! # Data Flow
//! ```text
//! project ids (in order)
//!     → catalog.rs (one aggregated list per project, paged)
//!         scope key "regions/x" → region "x", "global" → "global"
//!         keep kind == compute#backendService with a name
//!     → RegionMap per project (failures recorded, not fatal to the batch)
//!     → emitter.rs
//!     → {"data": [{"{#PRODUCT_ID}", "{#REGION}", "{#NAME}"}, ...]}
//! ```
//!
//! # Design Decisions
//! - One unreachable project never blanks out the inventory of the others
//! - The payload is serialized from types, so an empty inventory is `{"data":[]}`

pub mod catalog;
pub mod emitter;

use std::collections::HashMap;

pub use catalog::{BackendServiceCatalog, BackendServiceRef, CatalogError, RegionMap};
pub use emitter::{emit, DiscoveryEntry, DiscoveryPayload};

use crate::auth::AccessToken;

/// Outcome of discovering several projects.
#[derive(Debug)]
pub struct DiscoveryRun {
    pub payload: DiscoveryPayload,
    /// Projects whose catalog was built.
    pub listed: usize,
    pub failures: Vec<CatalogError>,
}

impl DiscoveryRun {
    /// True when projects were requested and none of them could be listed.
    pub fn all_failed(&self) -> bool {
        self.listed == 0 && !self.failures.is_empty()
    }
}

/// Build catalogs for `projects` in sequence and emit the combined payload.
pub async fn discover(
    catalog: &BackendServiceCatalog<'_>,
    token: &AccessToken,
    projects: &[String],
) -> DiscoveryRun {
    let mut unique: Vec<String> = Vec::with_capacity(projects.len());
    for project in projects {
        if !unique.contains(project) {
            unique.push(project.clone());
        }
    }

    let mut catalogs = HashMap::with_capacity(unique.len());
    let mut failures = Vec::new();

    for project in &unique {
        match catalog.list(token, project).await {
            Ok(regions) => {
                catalogs.insert(project.clone(), regions);
            }
            Err(e) => {
                tracing::error!(project = %project, error = %e, "Backend service listing failed");
                failures.push(e);
            }
        }
    }

    DiscoveryRun {
        payload: emit(&unique, &catalogs),
        listed: catalogs.len(),
        failures,
    }
}
