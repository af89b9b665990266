//! Auth permission service.
//!
//! Authorization decisions live in an external ReBAC engine (SpiceDB).
//! This service makes sure the engine runs the schema shipped with this
//! binary:
//!
//! 1. The `permissions/` directory is embedded at build time ([`bundle`]).
//! 2. [`PermissionService`] construction applies every definition in
//!    order and fails if any of them cannot be loaded, parsed or written.
//! 3. A background watcher logs once the [`lifecycle`] signal fires.

pub mod bundle;
mod config;
mod error;
pub mod lifecycle;
mod logging;
mod service;

pub use config::{Args, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::{lifecycle, ShutdownSignal, ShutdownTrigger};
pub use logging::init_logging;
pub use service::{connect, PermissionService};
