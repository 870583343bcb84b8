//! Logging infrastructure for the bikeshare explorer
//!
//! Standard output belongs to the interactive dialogue, so log records go
//! elsewhere: a daily-rotating file in the app data directory, and stderr
//! for warnings and errors only.
//!
//! ## Usage
//!
//! ```no_run
//! use bikeshare::logging;
//!
//! // Initialize once at startup
//! logging::init().expect("Failed to initialize logging");
//!
//! tracing::info!("Session started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/bikeshare/logs`
/// - macOS: `~/Library/Application Support/bikeshare/logs`
/// - Linux: `~/.local/share/bikeshare/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("bikeshare").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes file and stderr logging.
///
/// `bikeshare.<date>.log` receives everything allowed by `RUST_LOG`
/// (default `info`), rotating daily with 10 files kept. Stderr only shows
/// warnings and errors.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("bikeshare")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized, log directory: {:?}", log_dir);

    Ok(())
}
