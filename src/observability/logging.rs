//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from the loaded settings
//! - Map `logfile-level` onto tracing levels
//! - Write to `logfile` when set, stderr otherwise
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Log files are opened in append mode without ANSI colours

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogLevel, ServerSettings};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("can't open log file '{}'", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logging already initialized")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter directive for a configured verbosity.
pub fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "trace",
        LogLevel::Verbose => "debug",
        LogLevel::Notice => "info",
        LogLevel::Warning => "warn",
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(settings: &ServerSettings) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(settings.log_level)));

    let (file_layer, stderr_layer) = match &settings.logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
            (Some(layer), None)
        }
        None => (None, Some(fmt::layer().with_writer(io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;
    Ok(())
}
