//! Configuration loading: read sources, apply lines, validate the result.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::parser::{tokenize, LineParser};
use crate::config::registry::Registry;
use crate::config::schema::{InvariantError, ServerSettings, SettingsError};
use crate::config::validation::{validate, Payload, ValidationError};
use crate::config::value::Kind;

/// Why a configuration line was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("Unknown configuration name `{0}`")]
    UnknownName(String),

    #[error("Incorrect args: expected {expected}, got {found}")]
    Arity { expected: usize, found: usize },

    #[error("Validate failed: {0}")]
    Validation(#[from] ValidationError),
}

/// A rejected line of configuration text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {number}: {reason}")]
pub struct LineError {
    /// 1-based line number in the combined text.
    pub number: usize,
    /// The offending line as written.
    pub raw: String,
    pub reason: Reason,
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("can't open config file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Line(#[from] LineError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl LoadError {
    /// Multi-line report printed before the process exits.
    pub fn diagnostic(&self) -> String {
        let mut out = String::from("\n*** FATAL CONFIG FILE ERROR ***\n");
        // Writing into a String cannot fail.
        let _ = match self {
            LoadError::Line(err) => write!(
                out,
                "Reading the configuration file, at line {}\n>>> '{}'\nReason: {}\n",
                err.number, err.raw, err.reason
            ),
            LoadError::Io { source, .. } => writeln!(out, "Reason: {self} ({source})"),
            other => writeln!(out, "Reason: {other}"),
        };
        out
    }
}

/// Loaded configuration handed to the rest of the server.
#[derive(Debug, Clone)]
pub struct ConfigContext {
    /// Entries with their committed values, for runtime introspection.
    pub registry: Registry,
    /// Flat copy of the recognised settings.
    pub settings: ServerSettings,
}

/// Combine the config file and inline overrides into one text.
///
/// Overrides come after the file so their lines win. The file is read as
/// bytes; invalid UTF-8 sequences become U+FFFD rather than failing the load.
pub fn read_sources(file: Option<&Path>, overrides: Option<&str>) -> Result<String, LoadError> {
    let mut text = match file {
        Some(path) => {
            let bytes = fs::read(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        None => String::new(),
    };
    if let Some(overrides) = overrides {
        text.push('\n');
        text.push_str(overrides);
    }
    Ok(text)
}

/// Apply every line of `text` to `registry`.
///
/// Stops at the first bad line. Lines before it stay applied.
pub fn apply(registry: &mut Registry, text: &str) -> Result<(), LineError> {
    let mut parser = LineParser::new(text);

    while let Some(line) = parser.next_line() {
        let fail = |reason: Reason| LineError {
            number: line.number,
            raw: line.raw.to_string(),
            reason,
        };

        let tokens = tokenize(line.text);
        let name = tokens[0];
        let Some(entry) = registry.lookup_mut(name) else {
            return Err(fail(Reason::UnknownName(name.to_string())));
        };

        let payload = if tokens.len() == 1 && entry.kind() == Kind::List {
            Payload::List(parser.take_list_block())
        } else {
            if let Some(expected) = entry.arity().rejects(tokens.len()) {
                return Err(fail(Reason::Arity {
                    expected,
                    found: tokens.len(),
                }));
            }
            Payload::Token(tokens.get(1).copied().unwrap_or(""))
        };

        validate(entry, name, payload).map_err(|e| fail(e.into()))?;
        tracing::debug!(line = line.number, setting = entry.name(), "Configuration line applied");
    }

    Ok(())
}

/// Apply `text` on top of `registry` and validate the result as a whole.
pub fn load(mut registry: Registry, text: &str) -> Result<ConfigContext, LoadError> {
    apply(&mut registry, text)?;
    let settings = ServerSettings::from_registry(&registry)?;
    settings.check()?;
    Ok(ConfigContext { registry, settings })
}

/// Load the server's settings from an optional file plus inline overrides.
pub fn load_config(file: Option<&Path>, overrides: Option<&str>) -> Result<ConfigContext, LoadError> {
    let text = read_sources(file, overrides)?;
    let context = load(Registry::with_defaults(), &text)?;
    tracing::debug!(entries = context.registry.len(), "Configuration loaded");
    Ok(context)
}
