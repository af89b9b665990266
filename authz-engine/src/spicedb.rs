//! SpiceDB client over the HTTP/JSON gateway.
//!
//! Only `POST /v1/schema/write` is used. Every request carries the
//! pre-shared key as a bearer token.

use crate::engine::PolicyEngine;
use crate::error::{EngineError, EngineResult};
use crate::types::{SchemaWriteRequest, WriteSchemaResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const WRITE_SCHEMA_PATH: &str = "/v1/schema/write";

/// Connection settings for the policy engine.
#[derive(Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the HTTP gateway (e.g. `http://spicedb:8443`).
    pub endpoint: String,
    /// Pre-shared key configured on the engine.
    pub preshared_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8443".to_string(),
            preshared_key: String::new(),
            timeout_secs: 10,
        }
    }
}

// The key never goes to the log.
impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("endpoint", &self.endpoint)
            .field("preshared_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EngineConfig {
    /// Checks the settings before any connection is attempted.
    pub fn validate(&self) -> EngineResult<()> {
        if self.endpoint.is_empty() {
            return Err(EngineError::Config("endpoint is required".into()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(EngineError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.preshared_key.is_empty() {
            return Err(EngineError::Config("preshared key is required".into()));
        }
        if self.timeout_secs == 0 {
            return Err(EngineError::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Error payload of the gateway (a serialized `google.rpc.Status`).
#[derive(Debug, Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// HTTP client for SpiceDB's schema service.
pub struct SpiceDbClient {
    config: EngineConfig,
    client: Client,
}

impl SpiceDbClient {
    /// Creates a client. No request is sent until the first write.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl PolicyEngine for SpiceDbClient {
    fn backend_name(&self) -> &str {
        "spicedb"
    }

    async fn write_schema(&self, request: &SchemaWriteRequest) -> EngineResult<WriteSchemaResponse> {
        debug!(endpoint = %self.config.endpoint, bytes = request.schema.len(), "Writing schema");

        let response = self
            .client
            .post(self.url(WRITE_SCHEMA_PATH))
            .bearer_auth(&self.config.preshared_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(WriteSchemaResponse::default());
            }
            return serde_json::from_str(&body)
                .map_err(|e| EngineError::UnexpectedResponse(format!("invalid write response: {e}")));
        }

        let rpc: Option<RpcStatus> = serde_json::from_str(&body).ok();
        let message = rpc
            .as_ref()
            .map(|s| s.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(EngineError::AuthFailed(message)),
            _ => Err(EngineError::Rejected {
                status: status.as_u16(),
                code: rpc.map_or(0, |s| s.code),
                message,
            }),
        }
    }
}
