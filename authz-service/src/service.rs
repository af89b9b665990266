//! The permission service and its startup sequence.

use crate::bundle;
use crate::error::ServiceResult;
use crate::lifecycle::ShutdownSignal;
use authz_engine::{EngineConfig, PolicyEngine, SpiceDbClient};
use authz_schema::{ResourceTree, SchemaSynchronizer, SyncReport};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, Instrument, Span};

/// Builds the engine client the service talks to.
pub fn connect(config: &EngineConfig) -> ServiceResult<Arc<dyn PolicyEngine>> {
    let client = SpiceDbClient::new(config.clone())?;
    info!(endpoint = %client.endpoint(), "Policy engine client ready");
    Ok(Arc::new(client))
}

/// Owns the authorization schema for the lifetime of the process.
///
/// Construction applies the bundled schema to the engine before returning,
/// so a `PermissionService` value only exists once the engine's model
/// matches this binary. Permission checks go to the engine directly and are
/// not routed through here.
pub struct PermissionService {
    report: SyncReport,
    watcher: JoinHandle<()>,
}

impl PermissionService {
    /// Synchronizes the embedded schema bundle and starts the shutdown
    /// watcher.
    pub async fn new(
        log: Span,
        engine: Arc<dyn PolicyEngine>,
        shutdown: ShutdownSignal,
    ) -> ServiceResult<Self> {
        Self::with_bundle(log, engine, shutdown, &bundle::permissions()).await
    }

    /// Same as [`PermissionService::new`] with a caller-supplied tree.
    pub async fn with_bundle(
        log: Span,
        engine: Arc<dyn PolicyEngine>,
        shutdown: ShutdownSignal,
        tree: &dyn ResourceTree,
    ) -> ServiceResult<Self> {
        let mut synchronizer = SchemaSynchronizer::new(engine);
        let report = synchronizer
            .synchronize(tree)
            .instrument(log.clone())
            .await?;

        log.in_scope(|| {
            info!(
                schemas = report.len(),
                revision = report.revision().map(|t| t.token.as_str()),
                "Permission migrations completed"
            );
        });

        let watcher = tokio::spawn(
            async move {
                shutdown.cancelled().await;
                info!("Permission service shutdown");
            }
            .instrument(log),
        );

        Ok(Self { report, watcher })
    }

    /// What the startup synchronization applied.
    pub fn report(&self) -> &SyncReport {
        &self.report
    }

    /// Returns true once the shutdown watcher has logged and exited.
    pub fn is_closed(&self) -> bool {
        self.watcher.is_finished()
    }

    /// Waits for the shutdown watcher to finish logging. Resolves only
    /// after the lifecycle signal has been cancelled.
    pub async fn closed(self) {
        let _ = self.watcher.await;
    }
}
