//! Error types for the permission service.

use authz_engine::EngineError;
use authz_schema::SchemaError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that prevent the permission service from starting.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The bundled schema could not be loaded, parsed or applied.
    #[error("permission schema synchronization failed: {0}")]
    Synchronization(#[from] SchemaError),

    /// The engine client could not be set up.
    #[error("policy engine setup failed: {0}")]
    Engine(#[from] EngineError),
}

impl ServiceError {
    /// Bundle path of the definition that failed, if any.
    pub fn schema_path(&self) -> Option<&str> {
        match self {
            ServiceError::Synchronization(e) => Some(e.path()),
            ServiceError::Engine(_) => None,
        }
    }
}
