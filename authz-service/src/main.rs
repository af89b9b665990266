//! Auth permission service entry point.
//!
//! Applies the bundled permission schema to SpiceDB, then idles until the
//! process is asked to stop. A schema that cannot be applied keeps the
//! service from starting.
//!
//! Usage:
//!   authz-service --engine-endpoint http://spicedb:8443 --engine-token $KEY
//!   authz-service --check

use anyhow::{Context, Result};
use authz_schema::validate_bundle;
use authz_service::lifecycle::wait_for_signal;
use authz_service::{bundle, connect, init_logging, lifecycle, Args, PermissionService, ServiceConfig};
use clap::Parser;
use tracing::{error, info, info_span};

/// Exit status for a graceful stop on SIGTERM (128 + 15).
const EXIT_GRACEFUL: i32 = 143;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from(Args::parse());
    init_logging(config.verbose)?;

    let span = info_span!("permission", service = %config.service_name);
    let tree = bundle::resolve(config.permissions_dir.as_deref());

    if config.check_only {
        let validated = validate_bundle(tree.as_ref())
            .inspect_err(|e| error!(path = %e.path(), "Schema bundle check failed: {}", e))
            .context("schema bundle check failed")?;
        for schema in &validated {
            info!(path = %schema.path, definitions = ?schema.request.definitions(), "Schema OK");
        }
        info!(count = validated.len(), "Schema bundle check passed");
        return Ok(());
    }

    info!(service = %config.service_name, "Auth permission service starting...");
    let engine = connect(&config.engine).context("failed to create policy engine client")?;

    let (trigger, signal) = lifecycle();
    let service = PermissionService::with_bundle(span, engine, signal, tree.as_ref())
        .await
        .inspect_err(|e| error!(path = ?e.schema_path(), "Permission service failed to start: {}", e))
        .context("failed to start permission service")?;
    info!(schemas = service.report().len(), "Service started");

    let signal_name = wait_for_signal()
        .await
        .context("failed to install signal handlers")?;

    trigger.shutdown();
    service.closed().await;

    info!(signal = signal_name, "Service stopped");
    std::process::exit(EXIT_GRACEFUL);
}
