//! Compute Engine load-balancer backend health library.

pub mod auth;
pub mod cli;
pub mod compute;
pub mod config;
pub mod discovery;
pub mod error;
pub mod health;
pub mod observability;

pub use compute::{ComputeApi, ComputeClient, Scope};
pub use discovery::{emit, DiscoveryPayload};
pub use error::AppError;
pub use health::{classify, Severity};
