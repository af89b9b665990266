//! Service configuration from command-line flags and environment.

use authz_engine::EngineConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "authz-service")]
#[command(about = "Auth permission service: applies the bundled ReBAC schema at startup")]
pub struct Args {
    /// Service name attached to log output
    #[arg(long, env = "SERVICE_NAME", default_value = "shortlink-auth")]
    pub service_name: String,

    /// Base URL of the SpiceDB HTTP gateway
    #[arg(long, env = "SPICEDB_ENDPOINT", default_value = "http://localhost:8443")]
    pub engine_endpoint: String,

    /// Pre-shared key for SpiceDB
    #[arg(long, env = "SPICEDB_PRESHARED_KEY", default_value = "", hide_env_values = true)]
    pub engine_token: String,

    /// Per-request timeout for engine calls, in seconds
    #[arg(long, env = "SPICEDB_TIMEOUT_SECS", default_value = "10")]
    pub engine_timeout_secs: u64,

    /// Load schemas from this directory instead of the embedded bundle
    #[arg(long, env = "PERMISSIONS_DIR")]
    pub permissions_dir: Option<PathBuf>,

    /// Parse the schema bundle and exit without contacting the engine
    #[arg(long)]
    pub check: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved service settings.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service_name: String,
    pub engine: EngineConfig,
    pub permissions_dir: Option<PathBuf>,
    pub check_only: bool,
    pub verbose: bool,
}

impl From<Args> for ServiceConfig {
    fn from(args: Args) -> Self {
        Self {
            service_name: args.service_name,
            engine: EngineConfig {
                endpoint: args.engine_endpoint,
                preshared_key: args.engine_token,
                timeout_secs: args.engine_timeout_secs,
            },
            permissions_dir: args.permissions_dir,
            check_only: args.check,
            verbose: args.verbose,
        }
    }
}
