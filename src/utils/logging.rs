//! Logging system initialization
//!
//! Sets up tracing-based logging to stderr, or to `<dir>/session.log` when
//! a log directory is supplied, with automatic rotation on startup keeping
//! 10 historical files.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (session.log.1 through session.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via the `RUST_LOG`
/// environment variable. With `log_dir` set, output goes to a session log
/// file in that directory; existing logs are rotated so the last 10
/// sessions are preserved. Without it, output goes to stderr.
pub fn init_logging(log_dir: Option<&Path>) -> Result<()> {
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            // Rotate existing log files on startup
            let log_path = dir.join("session.log");
            rotate_logs_on_startup(&log_path)?;

            // Rotation is handled manually above, so the appender itself
            // never rotates
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix("session")
                .filename_suffix("log")
                .build(dir)
                .map_err(|e| crate::error::SlideLoopError::ConfigError(Box::new(e)))?;

            let subscriber = fmt()
                .with_writer(file_appender)
                .with_env_filter(env_filter())
                .with_ansi(false) // Disable ANSI colors for file output
                .with_target(true)
                .with_thread_ids(true)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| crate::error::SlideLoopError::ConfigError(Box::new(e)))?;
        }
        None => {
            let subscriber = fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter())
                .with_target(true)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| crate::error::SlideLoopError::ConfigError(Box::new(e)))?;
        }
    }

    tracing::info!("slideloop v{} logging initialized", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on startup
///
/// Maintains a history of the last 10 sessions:
/// - session.log.9 is deleted (oldest log)
/// - session.log.8 -> session.log.9, ... , session.log.1 -> session.log.2
/// - session.log -> session.log.1
/// - A fresh session.log will be created by the logger
fn rotate_logs_on_startup(log_path: &PathBuf) -> Result<()> {
    // If the current log doesn't exist, nothing to rotate
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path.parent().ok_or_else(|| {
        crate::error::SlideLoopError::ConfigError(crate::error::StringError::new(
            "Invalid log path",
        ))
    })?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| {
            crate::error::SlideLoopError::ConfigError(crate::error::StringError::new(
                "Invalid log filename",
            ))
        })?
        .to_string_lossy();

    // Delete the oldest log file if it exists
    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    // Shift the numbered history up by one
    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    // Rotate the current log file into the first history slot
    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}
