//! Logging setup.
//!
//! The TUI owns stdout, so logs go to `<log_dir>/exo.log` through a
//! non-blocking writer. The filter comes from `RUST_LOG` (default `info`).

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const LOG_FILE_NAME: &str = "exo.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init(log_dir: &Path) -> Result<(), AppError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    fs::create_dir_all(log_dir).map_err(|e| {
        AppError::new(4, format!("Failed to create log directory '{}': {e}", log_dir.display()))
    })?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to install tracing subscriber: {e}")))?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(path = %log_dir.join(LOG_FILE_NAME).display(), "logging initialized");
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
