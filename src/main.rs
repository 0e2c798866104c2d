//! Compute Engine backend-service health checks for monitoring systems.
//!
//! # Modes
//!
//! ```text
//! --discovery --product_id P1 [P2 ...]
//!     → {"data":[{"{#PRODUCT_ID}":"P1","{#REGION}":"europe-west1","{#NAME}":"lb1"}, ...]}
//!
//! --check --product_id P --region R --name N [-d]
//!     → 0 (OK) | 1 (CRITICAL) | 2 (MULTI_DEGRADED) | 3 (SINGLE_DEGRADED)
//! ```
//!
//! Credentials come from `--token`, or from a service-account key activated
//! with gcloud (`--key`).

use std::io;
use std::process::ExitCode;

use clap::Parser;

use lb_health_check::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    let result = cli::run(args).await;
    ExitCode::from(cli::report_outcome(result, &mut io::stderr()))
}
