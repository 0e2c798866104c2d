//! Process-level error taxonomy and exit codes.

use thiserror::Error;

use crate::auth::AuthError;
use crate::compute::ComputeError;
use crate::config::ConfigError;
use crate::discovery::CatalogError;
use crate::health::ResolveError;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required input missing or inconsistent for the selected mode.
    #[error("{0}")]
    Configuration(String),

    /// Config file unreadable or invalid.
    #[error("configuration file: {0}")]
    Config(#[from] ConfigError),

    /// Credential activation failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The API client could not be constructed.
    #[error("compute client: {0}")]
    Client(#[from] ComputeError),

    /// Backend-service listing failed for every requested project.
    #[error("{}: {}", .0.project, .0.source)]
    Catalog(#[from] CatalogError),

    /// Backend-service descriptor lookup failed.
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// Results could not be written to stdout.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Configuration(_) | AppError::Config(_) => 2,
            AppError::Auth(_) => 3,
            AppError::Client(_)
            | AppError::Catalog(_)
            | AppError::Resolve(_)
            | AppError::Output(_)
            | AppError::Serialize(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Configuration("missing --region".into()).exit_code(), 2);
        assert_eq!(AppError::Auth(AuthError::EmptyToken).exit_code(), 3);
        assert_eq!(
            AppError::Resolve(ResolveError::NoBackends { name: "lb1".into() }).exit_code(),
            1
        );
    }

    #[test]
    fn test_catalog_error_display() {
        let err = AppError::from(CatalogError {
            project: "proj-x".into(),
            source: ComputeError::Api {
                status: 403,
                message: "Permission denied".into(),
            },
        });
        assert_eq!(err.to_string(), "proj-x: Permission denied");
        assert_eq!(err.exit_code(), 1);
    }
}
