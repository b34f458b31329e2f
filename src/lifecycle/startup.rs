//! Startup orchestration.
//!
//! # Responsibilities
//! - Combine the config file and command-line overrides
//! - Load and validate configuration before anything else starts
//! - Report the loaded configuration
//!
//! # Design Decisions
//! - Fail fast: a configuration error always terminates the process
//! - Only the binary exits; the library returns errors

use std::path::PathBuf;
use std::process;

use crate::config::format::dump;
use crate::config::{load_config, ConfigContext, LoadError, Registry};

/// Where configuration comes from at startup.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_file: Option<PathBuf>,
    /// `<name> <value>` lines applied after the file.
    pub overrides: Vec<String>,
    /// Report the configuration at info level instead of debug.
    pub test: bool,
}

impl StartupOptions {
    fn override_text(&self) -> Option<String> {
        if self.overrides.is_empty() {
            None
        } else {
            Some(self.overrides.join("\n"))
        }
    }
}

/// Load configuration as described by `options`.
pub fn load(options: &StartupOptions) -> Result<ConfigContext, LoadError> {
    let overrides = options.override_text();
    load_config(options.config_file.as_deref(), overrides.as_deref())
}

/// Load configuration or terminate the process with a diagnostic.
pub fn load_or_exit(options: &StartupOptions) -> ConfigContext {
    match load(options) {
        Ok(context) => context,
        Err(err) => {
            eprint!("{}", err.diagnostic());
            process::exit(1);
        }
    }
}

/// Log every setting between banner lines.
pub fn log_configuration(registry: &Registry, test: bool) {
    for line in dump(registry) {
        if test {
            tracing::info!("{line}");
        } else {
            tracing::debug!("{line}");
        }
    }
}
