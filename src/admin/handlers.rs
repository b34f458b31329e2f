use serde::Serialize;

use crate::config::format::{render_bounded, REPLY_LIMIT};
use crate::config::{Registry, ServerSettings};

/// Reply sent when the requested name resolves to no setting.
pub const NO_SUCH_CONFIGURATION: &str = "No such configuration";

/// A control client's request to describe one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigQuery {
    pub name: String,
}

impl ConfigQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReply {
    pub found: bool,
    pub line: String,
}

#[derive(Serialize)]
pub struct SettingsSnapshot<'a> {
    pub version: &'static str,
    pub settings: &'a ServerSettings,
}

/// Describe one setting as `name: value`, resolved like configuration lines.
pub fn describe(registry: &Registry, query: &ConfigQuery) -> ConfigReply {
    match registry.lookup(&query.name) {
        Some(entry) => ConfigReply {
            found: true,
            line: render_bounded(entry, REPLY_LIMIT),
        },
        None => {
            tracing::debug!(name = %query.name, "Configuration query did not resolve");
            ConfigReply {
                found: false,
                line: NO_SUCH_CONFIGURATION.to_string(),
            }
        }
    }
}

/// Every loaded setting as JSON.
pub fn snapshot(settings: &ServerSettings) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(SettingsSnapshot {
        version: env!("CARGO_PKG_VERSION"),
        settings,
    })
}
