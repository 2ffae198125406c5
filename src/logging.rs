//! File logging for the browser
//!
//! The terminal belongs to the UI, so log output goes to a file. The library
//! components only emit `tracing` events; installing a subscriber is up to
//! the binary.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Parse a level name; unknown names fall back to `info`
pub fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Install the file subscriber described by `config`
///
/// Returns the log file path, or `None` when no path could be determined
/// (logging is then disabled).
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    let Some(path) = config.log_path() else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(level_filter(&config.log_level))
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!(path = %path.display(), level = %config.log_level, "logging started");
    Ok(Some(path))
}
