//! Error types for policy engine calls.

use thiserror::Error;

/// Result type for policy engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while talking to the policy engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transport failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The engine processed the request and refused it.
    #[error("schema rejected by engine (status {status}, code {code}): {message}")]
    Rejected {
        status: u16,
        code: i32,
        message: String,
    },

    /// Missing or invalid pre-shared key.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The engine answered with something we could not interpret.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Returns true if the engine itself refused the schema, as opposed to
    /// the request never reaching it.
    pub fn is_rejection(&self) -> bool {
        matches!(self, EngineError::Rejected { .. })
    }

    /// Returns true if the underlying transport timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            EngineError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
