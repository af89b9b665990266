//! Ordered application of bundled schemas to the policy engine.
//!
//! Definitions may refer to types declared by files that sort before them,
//! so resources are applied one at a time in load order and the first
//! failure stops the run. Nothing is retried.

use crate::error::{SchemaError, SchemaResult};
use crate::loader::{load_resources, SchemaResource, SCHEMA_EXTENSION};
use crate::parser::parse_schema;
use crate::tree::ResourceTree;
use authz_engine::{PolicyEngine, SchemaWriteRequest, ZedToken};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one applied definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSchema {
    pub path: String,
    pub written_at: Option<ZedToken>,
}

/// Ordered record of a successful synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub applied: Vec<AppliedSchema>,
}

impl SyncReport {
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.applied.iter().map(|a| a.path.as_str()).collect()
    }

    /// Revision token of the last write, if the engine returned one.
    pub fn revision(&self) -> Option<&ZedToken> {
        self.applied.last().and_then(|a| a.written_at.as_ref())
    }
}

/// A definition that decoded cleanly but was not sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSchema {
    pub path: String,
    pub request: SchemaWriteRequest,
}

/// Applies schema resources to a policy engine.
///
/// Applying takes `&mut self`, so a synchronizer cannot run two passes
/// against its engine at once.
pub struct SchemaSynchronizer {
    engine: Arc<dyn PolicyEngine>,
}

impl SchemaSynchronizer {
    pub fn new(engine: Arc<dyn PolicyEngine>) -> Self {
        Self { engine }
    }

    /// Loads every definition from `tree` and applies them in order.
    pub async fn synchronize(&mut self, tree: &dyn ResourceTree) -> SchemaResult<SyncReport> {
        let resources = load_resources(tree, SCHEMA_EXTENSION)?;
        info!(
            count = resources.len(),
            backend = self.engine.backend_name(),
            "Loaded permission schemas"
        );
        self.apply(resources).await
    }

    /// Parses and writes each resource in the given order, stopping at the
    /// first parse or engine failure.
    pub async fn apply(&mut self, resources: Vec<SchemaResource>) -> SchemaResult<SyncReport> {
        let mut report = SyncReport::default();

        for resource in resources {
            let request = parse_schema(&resource)?;

            let response = self
                .engine
                .write_schema(&request)
                .await
                .map_err(|source| SchemaError::SchemaApply {
                    path: resource.path().to_string(),
                    source,
                })?;

            debug!(
                path = %resource.path(),
                revision = response.written_at.as_ref().map(|t| t.token.as_str()),
                "Applied permission schema"
            );
            report.applied.push(AppliedSchema {
                path: resource.path().to_string(),
                written_at: response.written_at,
            });
        }

        Ok(report)
    }
}

/// Loads and parses every definition without contacting an engine.
pub fn validate_bundle(tree: &dyn ResourceTree) -> SchemaResult<Vec<ValidatedSchema>> {
    let resources = load_resources(tree, SCHEMA_EXTENSION)?;
    resources
        .iter()
        .map(|resource| -> SchemaResult<ValidatedSchema> {
            Ok(ValidatedSchema {
                path: resource.path().to_string(),
                request: parse_schema(resource)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_accessors() {
        let report = SyncReport {
            applied: vec![
                AppliedSchema {
                    path: "a.yaml".into(),
                    written_at: Some(ZedToken { token: "t1".into() }),
                },
                AppliedSchema {
                    path: "b.yaml".into(),
                    written_at: Some(ZedToken { token: "t2".into() }),
                },
            ],
        };
        assert_eq!(report.len(), 2);
        assert!(!report.is_empty());
        assert_eq!(report.paths(), vec!["a.yaml", "b.yaml"]);
        assert_eq!(report.revision().unwrap().token, "t2");
    }

    #[test]
    fn empty_report_has_no_revision() {
        let report = SyncReport::default();
        assert!(report.is_empty());
        assert!(report.revision().is_none());
    }
}
