//! Backend-service health checking.
//!
//! # Data Flow
//! ```text
//! (project, scope, name)
//!     → resolver.rs
//!         1. GET descriptor      → backends[0].group
//!         2. POST getHealth      → HealthReport { records, raw }
//!     → classifier.rs
//!         records → Severity (0 OK, 1 CRITICAL, 2 MULTI_DEGRADED, 3 SINGLE_DEGRADED)
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function, separate from any I/O
//! - Health records are consumed immediately; nothing is cached between runs

pub mod classifier;
pub mod resolver;

pub use classifier::{classify, Severity};
pub use resolver::{HealthResolver, ResolveError, ServiceTarget};
