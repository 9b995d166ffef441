//! Logging setup for the explorer.
//!
//! Standard output belongs to the interactive session, so diagnostics go
//! elsewhere: a daily rolling file in the platform data directory receives
//! everything the `EnvFilter` lets through, and stderr only shows warnings.
//!
//! ```no_run
//! bikeshare::logging::init(true).expect("Failed to initialize logging");
//! tracing::info!("explorer started");
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

/// Initializes the global subscriber.
///
/// With `log_to_file` the file layer writes `bikeshare.<date>.log`, rotated
/// daily with 10 files kept.
///
/// # Errors
///
/// Returns error if the log directory or the file appender cannot be created.
pub fn init(log_to_file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new("warn"));

    let file_layer = if log_to_file {
        let log_dir = get_log_dir()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("bikeshare")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create log file appender")?;

        Some(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(log_to_file, "logging initialized");
    Ok(())
}
