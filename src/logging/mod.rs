//! Logging configuration and initialization
//!
//! Centralized logging setup using the `tracing` ecosystem, with
//! human-readable or JSON output selectable via environment variables.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: standard tracing filter (e.g., "info", "debug,gemmforge=trace")
//! - `GEMMFORGE_LOG_LEVEL`: simple log level (error, warn, info, debug, trace)
//! - `GEMMFORGE_LOG_FORMAT`: output format ("human" or "json")

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Global flag to track if tracing has been initialized
static TRACING_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default log level when no environment variable is set
const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable for log level override
const LOG_LEVEL_ENV: &str = "GEMMFORGE_LOG_LEVEL";

/// Environment variable for log format (json/human)
const LOG_FORMAT_ENV: &str = "GEMMFORGE_LOG_FORMAT";

/// Errors that can occur during logging initialization
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("invalid log format: {0}")]
    InvalidLogFormat(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON structured output
    Json,
}

impl LogFormat {
    fn from_env() -> Result<Self, LoggingError> {
        match std::env::var(LOG_FORMAT_ENV) {
            Ok(value) => match value.to_lowercase().as_str() {
                "human" => Ok(LogFormat::Human),
                "json" => Ok(LogFormat::Json),
                other => Err(LoggingError::InvalidLogFormat(other.to_string())),
            },
            Err(_) => Ok(LogFormat::default()),
        }
    }
}

fn level_filter_from_env() -> Result<EnvFilter, LoggingError> {
    // RUST_LOG takes precedence; GEMMFORGE_LOG_LEVEL is the simple override.
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    let level = match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => {
            let lower = value.to_lowercase();
            match lower.as_str() {
                "error" | "warn" | "info" | "debug" | "trace" => lower,
                other => return Err(LoggingError::InvalidLogLevel(other.to_string())),
            }
        }
        Err(_) => DEFAULT_LOG_LEVEL.to_string(),
    };
    Ok(EnvFilter::new(level))
}

/// Initialize tracing for the process. Safe to call more than once; only the
/// first call installs a subscriber.
pub fn init_logging() -> Result<(), LoggingError> {
    let format = LogFormat::from_env()?;
    let filter = level_filter_from_env()?;

    TRACING_INITIALIZED.get_or_try_init(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        match format {
            LogFormat::Human => builder.init(),
            LogFormat::Json => builder.json().init(),
        }
        Ok(())
    })?;
    Ok(())
}
