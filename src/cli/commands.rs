//! Discovery and check execution.
//!
//! Results are written to the supplied writer (stdout in production):
//! discovery prints one JSON line, check prints the severity code and, with
//! debug, the raw getHealth response on a second line.

use std::io::Write;

use crate::auth::AccessToken;
use crate::compute::ComputeApi;
use crate::discovery::{discover, BackendServiceCatalog};
use crate::error::AppError;
use crate::health::{classify, HealthResolver, ServiceTarget};

pub async fn run_discovery<W: Write>(
    api: &dyn ComputeApi,
    token: &AccessToken,
    projects: &[String],
    out: &mut W,
) -> Result<(), AppError> {
    let catalog = BackendServiceCatalog::new(api);
    let run = discover(&catalog, token, projects).await;

    writeln!(out, "{}", run.payload.to_json()?)?;
    out.flush()?;

    tracing::info!(
        projects = projects.len(),
        failed = run.failures.len(),
        entries = run.payload.data.len(),
        "Discovery finished"
    );

    if run.all_failed() {
        if let Some(failure) = run.failures.into_iter().last() {
            return Err(AppError::Catalog(failure));
        }
    }
    Ok(())
}

pub async fn run_check<W: Write>(
    api: &dyn ComputeApi,
    token: &AccessToken,
    project: &str,
    target: &ServiceTarget,
    debug: bool,
    out: &mut W,
) -> Result<(), AppError> {
    let resolver = HealthResolver::new(api);
    let result = resolver
        .resolve(token, project, &target.scope, &target.name)
        .await;

    match result {
        Ok(report) => {
            let severity = classify(&report.records);
            tracing::info!(
                project,
                scope = %target.scope,
                name = %target.name,
                instances = report.records.len(),
                severity = severity.code(),
                "Backend service classified"
            );

            writeln!(out, "{severity}")?;
            if debug {
                writeln!(out, "{}", serde_json::to_string(&report.raw)?)?;
            }
            out.flush()?;
            Ok(())
        }
        Err(e) => {
            writeln!(out, "Error: {e}")?;
            out.flush()?;
            if e.is_fatal() {
                return Err(AppError::Resolve(e));
            }
            tracing::warn!(
                project,
                scope = %target.scope,
                name = %target.name,
                error = %e,
                "Health check request failed"
            );
            Ok(())
        }
    }
}
