//! Structured logging for the command line tool.
//!
//! Provides configurable logging with:
//! - Console output on stderr, kept quiet unless asked for
//! - Optional file output with JSON formatting and rotation
//! - `RUST_LOG` override for the console filter
//!
//! Console output goes to stderr so that `--json` output on stdout stays
//! machine-readable.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log file name prefix and the crate targets our filters enable.
const LOG_FILE_PREFIX: &str = "tubetally";
const CRATE_TARGETS: [&str; 2] = ["tubetally", "tubetally_core"];

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files are stored.
    pub log_directory: PathBuf,
    /// Log file name prefix (e.g., "tubetally" -> "tubetally.2024-01-15").
    pub log_file_prefix: String,
    /// Maximum level for our crates on the console.
    pub console_level: Level,
    /// Maximum level for our crates in the log file.
    pub file_level: Level,
    /// Whether to write a JSON log file at all.
    pub file_logging: bool,
    /// How often to rotate log files.
    pub rotation: LogRotation,
    /// Whether to include ANSI color codes in console output.
    pub console_ansi: bool,
    /// Whether to include file/line info in console logs.
    pub include_file_line: bool,
    /// Whether to include the target module in console logs.
    pub include_target: bool,
    /// Whether to log span events (enter/exit).
    pub log_span_events: bool,
}

/// Log rotation frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    /// Create a new log file every hour.
    Hourly,
    /// Create a new log file every day.
    Daily,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Verbose console output and a trace-level log file.
    #[must_use]
    pub fn development() -> Self {
        Self {
            log_directory: default_log_directory(),
            log_file_prefix: LOG_FILE_PREFIX.to_string(),
            console_level: Level::DEBUG,
            file_level: Level::TRACE,
            file_logging: true,
            rotation: LogRotation::Hourly,
            console_ansi: true,
            include_file_line: true,
            include_target: true,
            log_span_events: true,
        }
    }

    /// Warnings only on the console, no log file.
    #[must_use]
    pub fn production() -> Self {
        Self {
            log_directory: default_log_directory(),
            log_file_prefix: LOG_FILE_PREFIX.to_string(),
            console_level: Level::WARN,
            file_level: Level::DEBUG,
            file_logging: false,
            rotation: LogRotation::Daily,
            console_ansi: true,
            include_file_line: false,
            include_target: false,
            log_span_events: false,
        }
    }

    /// Pick a preset from the command line verbosity.
    ///
    /// `0` is [`LoggingConfig::production`], `1` raises the console to
    /// info, and `2` or more selects [`LoggingConfig::development`].
    #[must_use]
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::production(),
            1 => Self::production().with_console_level(Level::INFO),
            _ => Self::development(),
        }
    }

    /// Set the log directory.
    #[must_use]
    pub fn with_log_directory(mut self, path: PathBuf) -> Self {
        self.log_directory = path;
        self
    }

    /// Set the console log level.
    #[must_use]
    pub const fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Enable or disable the JSON log file.
    #[must_use]
    pub const fn with_file_logging(mut self, enabled: bool) -> Self {
        self.file_logging = enabled;
        self
    }
}

/// Guard that keeps file logging active. Drop this to flush and close log files.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Returns a guard that must be kept alive until the program exits so
/// pending file entries are flushed.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a filter
/// directive is rejected.
///
/// # Panics
///
/// Panics if logging has already been initialized.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let span_events = if config.log_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // RUST_LOG wins over the verbosity flags.
    let console_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(config.console_level))?,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.console_ansi)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_span_events(span_events.clone())
        .with_filter(console_filter);

    let (file_layer, file_guard) = if config.file_logging {
        if !config.log_directory.exists() {
            std::fs::create_dir_all(&config.log_directory).map_err(|e| {
                LoggingError::DirectoryCreationFailed {
                    path: config.log_directory.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        let file_appender = RollingFileAppender::new(
            config.rotation.into(),
            &config.log_directory,
            &config.log_file_prefix,
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .json()
            .with_filter(EnvFilter::try_new(filter_directives(config.file_level))?);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Get the default log directory.
#[must_use]
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubetally")
        .join("logs")
}

/// Filter string enabling `level` for our crates and warnings elsewhere.
fn filter_directives(level: Level) -> String {
    let level = level_to_directive(level);
    CRATE_TARGETS
        .iter()
        .fold(String::from("warn"), |directives, target| {
            format!("{directives},{target}={level}")
        })
}

/// Convert a tracing Level to a filter directive string.
const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory {path}: {reason}")]
    DirectoryCreationFailed {
        /// The path that could not be created.
        path: PathBuf,
        /// The reason for the failure.
        reason: String,
    },

    /// A filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
}
