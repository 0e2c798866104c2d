//! Command-line surface.
//!
//! Flag names follow the existing monitoring item keys (`--product_id`,
//! `--discovery`, `--check`), so templates keep working unchanged.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, ArgGroup, Parser};

use crate::auth::{GcloudServiceAccount, StaticToken, TokenProvider};
use crate::compute::Scope;
use crate::config::AuthConfig;
use crate::error::AppError;
use crate::health::ServiceTarget;

#[derive(Debug, Parser)]
#[command(name = "lb-health-check")]
#[command(
    about = "Discovery and health checks for Compute Engine backend services",
    long_about = None
)]
#[command(group(ArgGroup::new("mode").required(true).args(["discovery", "check"])))]
pub struct Cli {
    /// Print a low-level discovery payload of every backend service
    #[arg(long)]
    pub discovery: bool,

    /// Print the severity code of one backend service
    #[arg(long)]
    pub check: bool,

    /// Project id(s); check mode accepts exactly one
    #[arg(
        long = "product_id",
        visible_alias = "product-id",
        value_name = "PRODUCT_ID",
        num_args = 1..
    )]
    pub product_id: Vec<String>,

    /// Region of the backend service, or "global"
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Backend service name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Pre-obtained access token
    #[arg(long, value_name = "TOKEN", conflicts_with = "key")]
    pub token: Option<String>,

    /// Service-account key file, activated through gcloud
    #[arg(long, value_name = "KEY_FILE")]
    pub key: Option<PathBuf>,

    /// Verbose logs on stderr; check mode also prints the raw health response
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What a run should do, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Discovery {
        projects: Vec<String>,
    },
    Check {
        project: String,
        target: ServiceTarget,
    },
}

/// Where the access token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Token(String),
    KeyFile(PathBuf),
}

impl Credentials {
    pub fn provider(&self, auth: &AuthConfig) -> Box<dyn TokenProvider> {
        match self {
            Credentials::Token(token) => Box::new(StaticToken::new(token.clone())),
            Credentials::KeyFile(key_file) => Box::new(
                GcloudServiceAccount::new(auth.gcloud_path.clone(), key_file.clone())
                    .with_timeout(Duration::from_secs(auth.command_timeout_secs)),
            ),
        }
    }
}

impl Cli {
    pub fn debug_enabled(&self) -> bool {
        self.debug > 0
    }

    /// Validate mode-specific arguments.
    pub fn command(&self) -> Result<Command, AppError> {
        let projects: Vec<String> = self
            .product_id
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if self.discovery {
            if projects.is_empty() {
                return Err(AppError::Configuration(
                    "You must specify the product id as argument --product_id <PRODUCT_ID_NAME_1> <PRODUCT_ID_NAME_2>"
                        .to_string(),
                ));
            }
            return Ok(Command::Discovery { projects });
        }

        let [project] = projects.as_slice() else {
            return Err(AppError::Configuration(
                "In the check you need to specify exactly one --product_id <PRODUCT_ID_NAME>"
                    .to_string(),
            ));
        };
        let region = non_empty(&self.region).ok_or_else(|| {
            AppError::Configuration(
                "You must specify the region as an argument --region <REGION_NAME>".to_string(),
            )
        })?;
        let name = non_empty(&self.name).ok_or_else(|| {
            AppError::Configuration(
                "You must specify the service name as argument --name <LOAD_BALANCER_NAME>"
                    .to_string(),
            )
        })?;

        Ok(Command::Check {
            project: project.clone(),
            target: ServiceTarget::new(Scope::from_region(region), name),
        })
    }

    /// Pick credentials: flags first, then the config file.
    pub fn credentials(&self, auth: &AuthConfig) -> Result<Credentials, AppError> {
        if let Some(token) = non_empty(&self.token) {
            return Ok(Credentials::Token(token.to_string()));
        }
        if let Some(key) = &self.key {
            return Ok(Credentials::KeyFile(key.clone()));
        }
        if let Some(token) = non_empty(&auth.token) {
            return Ok(Credentials::Token(token.to_string()));
        }
        if let Some(key) = &auth.key_file {
            return Ok(Credentials::KeyFile(key.clone()));
        }
        Err(AppError::Configuration(
            "Use either --token <YOUR_TOKEN> or --key <PATH_TO_YOUR_FILE>.".to_string(),
        ))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
