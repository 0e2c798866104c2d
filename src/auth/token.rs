//! Token providers.
//!
//! # Responsibilities
//! - Hand the core a bearer token, whatever its origin
//! - Activate a service-account key through the gcloud CLI
//!
//! # Design Decisions
//! - Token values never reach logs (`Debug` is redacted)
//! - Activation is verified from gcloud's stderr, which is where it reports success

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Marker gcloud writes to stderr after a successful activation.
const ACTIVATION_MARKER: &str = "Activated service account credentials for";

/// Limit on a single gcloud invocation unless configured otherwise.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer credential for the compute API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Errors raised while obtaining a token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A supplied token was empty.
    #[error("access token is empty")]
    EmptyToken,

    /// The credential tool could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The credential tool did not exit in time and was killed.
    #[error("{program} did not finish within {}s", .timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },

    /// Service-account activation was rejected.
    #[error("service account activation failed: {0}")]
    Activation(String),

    /// Activation succeeded but no token could be printed.
    #[error("failed to print access token: {0}")]
    PrintToken(String),
}

/// Source of bearer tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<AccessToken, AuthError>;
}

/// A token obtained out of band (`--token`).
#[derive(Debug, Clone)]
pub struct StaticToken(AccessToken);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(AccessToken::new(token))
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<AccessToken, AuthError> {
        let trimmed = self.0.secret().trim();
        if trimmed.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(AccessToken::new(trimmed))
    }
}

/// Activates a service-account key file with gcloud, then prints a token.
#[derive(Debug, Clone)]
pub struct GcloudServiceAccount {
    program: PathBuf,
    key_file: PathBuf,
    timeout: Duration,
}

impl GcloudServiceAccount {
    pub fn new(program: impl Into<PathBuf>, key_file: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            key_file: key_file.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one gcloud command. The child is killed if the deadline passes.
    async fn run(&self, args: &[String]) -> Result<std::process::Output, AuthError> {
        let program = || self.program.display().to_string();
        let mut command = Command::new(&self.program);
        command.args(args).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(output) => output.map_err(|source| AuthError::Spawn {
                program: program(),
                source,
            }),
            Err(_) => {
                tracing::warn!(
                    program = %program(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Credential command timed out"
                );
                Err(AuthError::Timeout {
                    program: program(),
                    timeout: self.timeout,
                })
            }
        }
    }
}

#[async_trait]
impl TokenProvider for GcloudServiceAccount {
    async fn token(&self) -> Result<AccessToken, AuthError> {
        tracing::debug!(key_file = %self.key_file.display(), "Activating service account");

        let activate = self
            .run(&[
                "auth".to_string(),
                "activate-service-account".to_string(),
                format!("--key-file={}", self.key_file.display()),
            ])
            .await?;
        let stderr = String::from_utf8_lossy(&activate.stderr);
        if !activation_succeeded(&stderr) {
            return Err(AuthError::Activation(stderr.trim().to_string()));
        }

        let printed = self
            .run(&["auth".to_string(), "print-access-token".to_string()])
            .await?;
        if !printed.status.success() {
            return Err(AuthError::PrintToken(
                String::from_utf8_lossy(&printed.stderr).trim().to_string(),
            ));
        }

        let token = String::from_utf8_lossy(&printed.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(AccessToken::new(token))
    }
}

fn activation_succeeded(stderr: &str) -> bool {
    stderr.contains(ACTIVATION_MARKER)
}
