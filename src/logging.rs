//! Logging setup for the publisher binary.
//!
//! Diagnostics go through `tracing`. Two sinks are installed:
//!
//! - **Console**: compact format on stderr, so stdout stays reserved for the
//!   statistics block and the dry-run preview.
//! - **File**: daily rotating `publisher.<date>.log` in the app data
//!   directory, 10 files retained.
//!
//! The level defaults to INFO and can be overridden with `RUST_LOG`.
//!
//! ```no_run
//! use qafiyah_publisher::logging;
//!
//! logging::init().expect("Failed to initialize logging");
//! tracing::info!("Publisher started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/qafiyah-publisher/logs`
/// - macOS: `~/Library/Application Support/qafiyah-publisher/logs`
/// - Linux: `~/.local/share/qafiyah-publisher/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("qafiyah-publisher").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
}

/// Initializes console and rolling-file logging.
///
/// # Errors
///
/// Returns error if the log directory or the file appender cannot be created.
/// Nothing is installed in that case, so the caller may fall back to
/// [`init_console`].
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("publisher")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer())
        .with(file_layer)
        .init();

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());

    Ok(())
}

/// Console-only logging, used when the log directory is unavailable.
pub fn init_console() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer())
        .init();
}
