//! Permission schema bundle handling.
//!
//! Loads the schema definitions shipped with the service, decodes them into
//! engine write requests, and applies them to the policy engine in a fixed
//! order.
//!
//! # Pipeline
//!
//! 1. **Load**: walk a [`ResourceTree`] depth first in name order and collect
//!    every `*.yaml` file ([`load_resources`]). All or nothing.
//! 2. **Parse**: decode each file into a [`SchemaWriteRequest`]
//!    ([`parse_schema`]). Strict; unknown keys and empty bodies fail.
//! 3. **Apply**: write each request to the engine in load order
//!    ([`SchemaSynchronizer`]). The first failure stops the run.
//!
//! Every failure is a [`SchemaError`] naming the bundle path it came from.
//!
//! [`SchemaWriteRequest`]: authz_engine::SchemaWriteRequest

mod error;
mod loader;
mod parser;
mod sync;
pub mod tree;

pub use error::{ErrorKind, ParseFailure, SchemaError, SchemaResult};
pub use loader::{load_resources, SchemaResource, SCHEMA_EXTENSION};
pub use parser::parse_schema;
pub use sync::{validate_bundle, AppliedSchema, SchemaSynchronizer, SyncReport, ValidatedSchema};
pub use tree::{DirTree, EmbeddedTree, ResourceTree, TreeEntry};
