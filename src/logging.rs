//! File logging.
//!
//! The terminal belongs to the renderer while the game runs, so log lines go
//! to a file instead. Without a path no subscriber is installed and every
//! `tracing` macro is a no-op.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing to `path` (appending).
///
/// Returns whether logging was enabled.
pub fn init(path: Option<&Path>) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_path() {
        assert!(!init(None).unwrap());
    }

    #[test]
    fn unopenable_path_is_an_error() {
        let err = init(Some(Path::new("/nonexistent-dir/birb.log"))).unwrap_err();
        assert!(err.to_string().contains("birb.log"));
    }
}
