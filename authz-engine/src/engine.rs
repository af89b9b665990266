//! Policy engine abstraction.
//!
//! The schema synchronizer only needs the engine's schema-write call, so
//! that is all this trait exposes. Connection management, timeouts and
//! retries belong to the implementation.

use crate::error::EngineResult;
use crate::types::{SchemaWriteRequest, WriteSchemaResponse};
use async_trait::async_trait;

/// A policy engine that accepts schema writes.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Short name of the backend, used in log output.
    fn backend_name(&self) -> &str;

    /// Submits one schema to the engine and waits for the outcome.
    async fn write_schema(&self, request: &SchemaWriteRequest) -> EngineResult<WriteSchemaResponse>;
}

/// A recording engine for testing.
pub mod mock {
    use super::*;
    use crate::error::EngineError;
    use crate::types::ZedToken;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// gRPC `INVALID_ARGUMENT`, what the engine answers for bad schemas.
    const INVALID_ARGUMENT: i32 = 3;

    /// Records every schema write and optionally rejects some of them.
    #[derive(Debug, Default)]
    pub struct RecordingEngine {
        calls: Mutex<Vec<SchemaWriteRequest>>,
        defined: Mutex<HashSet<String>>,
        reject_call: Option<usize>,
        validate_references: bool,
    }

    impl RecordingEngine {
        pub fn new() -> Self {
            Self::default()
        }

        /// Rejects the call with the given zero-based index.
        pub fn rejecting_call(mut self, index: usize) -> Self {
            self.reject_call = Some(index);
            self
        }

        /// Rejects schemas whose relations reference types that were not
        /// defined in the same write or an earlier accepted one.
        pub fn validating_references(mut self) -> Self {
            self.validate_references = true;
            self
        }

        /// All writes received so far, accepted or not.
        pub fn calls(&self) -> Vec<SchemaWriteRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn undefined_reference(&self, request: &SchemaWriteRequest) -> Option<String> {
            let defined = self.defined.lock().unwrap();
            let local: HashSet<&str> = request.definitions().into_iter().collect();
            referenced_types(&request.schema)
                .into_iter()
                .find(|ty| !local.contains(ty.as_str()) && !defined.contains(ty))
        }
    }

    #[async_trait]
    impl PolicyEngine for RecordingEngine {
        fn backend_name(&self) -> &str {
            "mock"
        }

        async fn write_schema(
            &self,
            request: &SchemaWriteRequest,
        ) -> EngineResult<WriteSchemaResponse> {
            let index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(request.clone());
                calls.len() - 1
            };

            if self.reject_call == Some(index) {
                return Err(EngineError::Rejected {
                    status: 400,
                    code: INVALID_ARGUMENT,
                    message: format!("call {index} rejected"),
                });
            }

            if self.validate_references {
                if let Some(missing) = self.undefined_reference(request) {
                    return Err(EngineError::Rejected {
                        status: 400,
                        code: INVALID_ARGUMENT,
                        message: format!("object definition `{missing}` not found"),
                    });
                }
            }

            self.defined
                .lock()
                .unwrap()
                .extend(request.definitions().into_iter().map(str::to_string));

            Ok(WriteSchemaResponse {
                written_at: Some(ZedToken {
                    token: format!("rev-{}", index + 1),
                }),
            })
        }
    }

    /// Type names used on the right-hand side of `relation x: a | b#member`.
    fn referenced_types(schema: &str) -> Vec<String> {
        schema
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("relation "))
            .filter_map(|rest| rest.split_once(':').map(|(_, types)| types))
            .flat_map(|types| types.split('|'))
            .filter_map(|ty| ty.split_whitespace().next())
            .map(|ty| {
                ty.split(['#', ':'])
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .filter(|ty| !ty.is_empty())
            .collect()
    }

}
