//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional --config)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → command-line flags override auth settings
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the tool runs without any config file
//! - Validation separates syntactic (serde) from semantic checks
//! - A broken config file is fatal before any network call

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ApiConfig, AppConfig, AuthConfig, ObservabilityConfig};
pub use validation::ValidationError;
