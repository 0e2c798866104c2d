//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (project, scope, name)
//!     → logging.rs subscriber (fmt or JSON)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of interpolated messages, for machine parsing
//! - Access tokens never appear in events

pub mod logging;

pub use logging::init_logging;
