//! Logging setup.
//!
//! Logs go to stderr so stdout can carry MIDI bytes.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `verbose` raises the filter to debug regardless of configuration.
pub fn init(log_level: &str, verbose: bool) -> Result<()> {
    let directive = if verbose { "debug" } else { log_level };
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter {directive:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}
