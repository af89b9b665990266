//! Error types for schema loading and synchronization.
//!
//! Every variant names the bundle path that caused it, so a failed startup
//! points straight at the offending definition file.

use authz_engine::EngineError;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Which stage of synchronization failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ResourceLoad,
    SchemaParse,
    SchemaApply,
}

/// Errors that abort a synchronization run.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Walking the bundle or reading a definition failed.
    #[error("failed to load schema resource '{path}': {source}")]
    ResourceLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A bundled definition is malformed.
    #[error("failed to parse schema '{path}': {source}")]
    SchemaParse {
        path: String,
        #[source]
        source: ParseFailure,
    },

    /// The policy engine refused or failed the write.
    #[error("failed to write schema '{path}': {source}")]
    SchemaApply {
        path: String,
        #[source]
        source: EngineError,
    },
}

impl SchemaError {
    /// Bundle path of the resource that failed.
    pub fn path(&self) -> &str {
        match self {
            SchemaError::ResourceLoad { path, .. }
            | SchemaError::SchemaParse { path, .. }
            | SchemaError::SchemaApply { path, .. } => path,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::ResourceLoad { .. } => ErrorKind::ResourceLoad,
            SchemaError::SchemaParse { .. } => ErrorKind::SchemaParse,
            SchemaError::SchemaApply { .. } => ErrorKind::SchemaApply,
        }
    }
}

/// Why a definition could not be decoded.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("schema body is empty")]
    EmptySchema,
}
