//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,jsroute_core=debug,jsroute=debug";
const LOG_FILE: &str = "jsroute.log";

fn install<W>(writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

/// Initialize structured logging to `~/.local/state/jsroute/jsroute.log`.
/// Returns Err when the log file cannot be opened so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let log_dir = xdg::BaseDirectories::with_prefix("jsroute")?.get_state_home();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;

    let path = log_dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    install(Mutex::new(file));
    tracing::info!("jsroute logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only. Used when [`init_logging`] fails.
pub fn init_logging_stderr() {
    install(std::io::stderr);
}
