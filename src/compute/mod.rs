//! Compute API access.
//!
//! # Data Flow
//! ```text
//! Catalog (discovery):
//!     GET  projects/{p}/aggregated/backendServices   → BackendServiceAggregatedList
//!
//! Resolver (check):
//!     GET  projects/{p}/{scope}/backendServices/{n}            → BackendServiceDescriptor
//!     POST projects/{p}/{scope}/backendServices/{n}/getHealth  → HealthReport
//!
//! {scope} = "global" | "regions/{region}"   (scope.rs)
//! ```
//!
//! # Design Decisions
//! - `ComputeApi` is the seam between decision logic and HTTP transport
//! - Response types tolerate missing fields; the provider omits empty collections

pub mod client;
pub mod scope;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ComputeApi, ComputeClient};
pub use scope::Scope;
pub use types::{
    BackendServiceAggregatedList, BackendServiceDescriptor, ComputeError, ComputeResult,
    HealthRecord, HealthReport, HealthState,
};
