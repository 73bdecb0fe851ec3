//! Rolling Logger
//!
//! Installs a process-wide `tracing` subscriber that writes human-readable
//! lines to stdout and JSON lines to a daily-rotated file. Only the newest
//! [`MAX_LOG_FILES`] files are kept.

use std::fmt;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as fmt_layer, EnvFilter};

/// Rotated files kept on disk
pub const MAX_LOG_FILES: usize = 7;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug)]
pub enum LoggerError {
    Io(std::io::Error),
    Appender(String),
    Init(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Failed to create log directory: {}", e),
            LoggerError::Appender(msg) => write!(f, "Failed to open log file: {}", msg),
            LoggerError::Init(msg) => write!(f, "Failed to install logger: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(value: std::io::Error) -> Self {
        LoggerError::Io(value)
    }
}

/// Keeps the background file writer alive; dropping it flushes pending lines.
pub struct LoggerGuard {
    _file: WorkerGuard,
}

/// Create the log directory and a daily appender named `<app_name>.<date>.log`
pub fn build_appender(log_dir: &Path, app_name: &str) -> Result<RollingFileAppender, LoggerError> {
    std::fs::create_dir_all(log_dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .map_err(|e| LoggerError::Appender(e.to_string()))
}

/// Install the global subscriber. Can only succeed once per process.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<LoggerGuard, LoggerError> {
    let appender = build_appender(log_dir.as_ref(), app_name)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer::layer().with_target(false))
        .with(fmt_layer::layer().json().with_writer(file_writer))
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    tracing::info!(app = app_name, dir = %log_dir.as_ref().display(), "Logger initialized");
    Ok(LoggerGuard { _file: guard })
}
