//! Log file setup
//!
//! The terminal belongs to the UI, so tracing output goes to
//! `~/.event-table/event-table.log` instead of stdout. `EVENT_TABLE_LOG`
//! takes an `EnvFilter` directive and overrides the level passed in.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "EVENT_TABLE_LOG";
pub const LOG_FILE_NAME: &str = "event-table.log";

/// Build the filter from the environment, falling back to `level`
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber writing to `dir/event-table.log`
pub fn init(dir: &Path, level: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(path)
}
