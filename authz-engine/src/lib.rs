//! Policy engine client for the auth service.
//!
//! Authorization decisions are delegated to an external ReBAC engine
//! (SpiceDB). This crate holds the one piece of the engine contract the
//! service drives itself: writing the authorization schema.
//!
//! - [`PolicyEngine`]: the schema-write capability, implemented by
//!   [`SpiceDbClient`] and by [`mock::RecordingEngine`] for tests.
//! - [`SchemaWriteRequest`]: the normalized unit submitted per definition.

mod engine;
mod error;
mod spicedb;
mod types;

pub use engine::{mock, PolicyEngine};
pub use error::{EngineError, EngineResult};
pub use spicedb::{EngineConfig, SpiceDbClient};
pub use types::{SchemaWriteRequest, WriteSchemaResponse, ZedToken};
