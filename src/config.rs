//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::DEFAULT_SCORE_FILE;

pub const ASSETS_DIR_VAR: &str = "BIRB_ASSETS_DIR";
pub const SCORE_FILE_VAR: &str = "BIRB_SCORE_FILE";
pub const LOG_VAR: &str = "BIRB_LOG";
pub const SEED_VAR: &str = "BIRB_SEED";

pub const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    pub score_file: PathBuf,
    /// Log file; `None` disables logging
    pub log_path: Option<PathBuf>,
    pub seed: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let assets_dir = get(ASSETS_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
        let score_file = get(SCORE_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_FILE));
        let log_path = get(LOG_VAR).map(PathBuf::from);
        let seed = get(SEED_VAR)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        Self {
            assets_dir,
            score_file,
            log_path,
            seed,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
