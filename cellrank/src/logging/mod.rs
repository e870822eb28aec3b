//! Structured logging setup on top of `tracing`.
//!
//! The library itself only emits events; binaries call [`init`] once with a
//! [`LoggingConfig`] to install a subscriber. `RUST_LOG`, when set, takes
//! precedence over the configured level.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Log file path has no file name
    #[error("Invalid log file path: {0}")]
    InvalidPath(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the global subscriber with the given configuration.
///
/// When a log file is configured the returned guard flushes it on drop and
/// must be kept alive for the life of the program. Calling this again after
/// a subscriber is installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = match (&config.file, config.stdout) {
        (Some(path), stdout) => {
            let (file, guard) = create_non_blocking_file(path)?;
            let writer = if stdout {
                BoxMakeWriter::new(std::io::stdout.and(file))
            } else {
                BoxMakeWriter::new(file)
            };
            (writer, Some(guard))
        }
        (None, true) => (BoxMakeWriter::new(std::io::stdout), None),
        (None, false) => return Ok(None),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Default => builder.try_init(),
    };

    if let Err(err) = result {
        tracing::debug!(error = %err, "Global subscriber already installed");
        return Ok(None);
    }

    Ok(guard)
}

/// Create a non-blocking writer appending to `path`.
fn create_non_blocking_file(
    path: impl AsRef<Path>,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::InvalidPath(path.display().to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a user-supplied log level such as `--log-level warn`.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}
