//! Structured logging setup for binaries embedding this engine.
//!
//! Library code never initializes a subscriber itself; this is purely a
//! convenience for applications that want the same `tracing-subscriber`
//! configuration used by this crate's own integration tests.

use blockref_types::{BlockRefError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global `tracing` subscriber filtered by `level` (e.g. `"info"`
/// or `"blockref_core=debug"`). Returns an error if a subscriber is already
/// installed or `level` is not a valid filter directive.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).map_err(|_| BlockRefError::Invalid("invalid log filter directive"))?;
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|_| BlockRefError::Invalid("logging already initialized"))
}
