//! Registry of recognised settings and their compiled-in defaults.
//!
//! # Design Decisions
//! - Entries are kept in registration order; printing and lookup both follow it
//! - Lookup is a case-insensitive prefix match of the query against stored
//!   names, so the first registered entry sharing a prefix wins
//! - Names are unique by construction; nothing checks this at runtime

use thiserror::Error;

use crate::config::entry::Entry;
use crate::config::value::{EnumOption, Kind, Value};

/// Log verbosity levels, most verbose first.
pub static VERBOSITY: [EnumOption; 4] = [
    EnumOption { id: 0, name: "DEBUG" },
    EnumOption { id: 1, name: "VERBOSE" },
    EnumOption { id: 2, name: "NOTICE" },
    EnumOption { id: 3, name: "WARNING" },
];

/// Worker strategies.
pub static WORKER_TYPES: [EnumOption; 2] = [
    EnumOption { id: 0, name: "SyncWorker" },
    EnumOption { id: 1, name: "AsyncWorker" },
];

pub const DEFAULT_PROTOCOL: &str = "Http";
pub const DEFAULT_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 10828;
pub const DEFAULT_STATS_ADDR: &str = "127.0.0.1";
pub const DEFAULT_STATS_PORT: i64 = 10829;
pub const DEFAULT_STAT_REFRESH_SECS: i64 = 10;
pub const DEFAULT_WORKER_TIMEOUT_SECS: i64 = 30;
pub const DEFAULT_MAX_BUFFER_SIZE: i64 = 10 * 1024 * 1024;
pub const DEFAULT_MBUF_SIZE: i64 = 16 * 1024;

pub const MAX_PORT: i64 = 65535;
pub const MAX_WORKERS: i64 = 1024;
pub const MAX_WORKER_TIMEOUT_SECS: i64 = 300;
/// Ceiling shared by buffer-size settings.
pub const BUFFER_LIMIT: i64 = 1024 * 1024 * 1024;

/// Errors from typed reads of the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no setting named `{0}`")]
    Missing(String),

    #[error("`{name}` is a {found} setting, not {expected}")]
    WrongKind { name: String, expected: Kind, found: Kind },
}

/// Ordered collection of configuration entries.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The server's recognised settings, in display order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(Entry::string("protocol", Some(DEFAULT_PROTOCOL)))
            .register(Entry::string("bind-addr", Some(DEFAULT_ADDR)))
            .register(Entry::integer("port", DEFAULT_PORT, Some(MAX_PORT)))
            .register(Entry::integer("worker-number", 2, Some(MAX_WORKERS)))
            .register(Entry::enumeration("worker-type", &WORKER_TYPES, &WORKER_TYPES[0]))
            .register(Entry::string("logfile", None))
            .register(Entry::enumeration("logfile-level", &VERBOSITY, &VERBOSITY[2]))
            .register(Entry::boolean("daemon", false))
            .register(Entry::string("pidfile", None))
            .register(Entry::integer("max-buffer-size", DEFAULT_MAX_BUFFER_SIZE, Some(BUFFER_LIMIT)))
            .register(Entry::string("stat-bind-addr", Some(DEFAULT_STATS_ADDR)))
            .register(Entry::integer("stat-port", DEFAULT_STATS_PORT, Some(MAX_PORT)))
            .register(Entry::integer("stat-refresh-time", DEFAULT_STAT_REFRESH_SECS, None))
            .register(Entry::string("stat-file", None))
            .register(Entry::integer("timeout-seconds", DEFAULT_WORKER_TIMEOUT_SECS, Some(MAX_WORKER_TIMEOUT_SECS)))
            .register(Entry::integer("mbuf-size", DEFAULT_MBUF_SIZE, Some(BUFFER_LIMIT)));
        registry
    }

    /// Append an entry after all existing ones.
    pub fn register(&mut self, entry: Entry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Resolve `query` to the first entry whose name starts with it,
    /// ignoring ASCII case. `"time"` resolves to `timeout-seconds`.
    pub fn lookup(&self, query: &str) -> Option<&Entry> {
        self.position(query).map(|i| &self.entries[i])
    }

    pub fn lookup_mut(&mut self, query: &str) -> Option<&mut Entry> {
        self.position(query).map(move |i| &mut self.entries[i])
    }

    /// Resolve an exact name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name().eq_ignore_ascii_case(name))
    }

    fn position(&self, query: &str) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        self.entries.iter().position(|entry| {
            entry
                .name()
                .get(..query.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(query))
        })
    }

    fn typed(&self, name: &str, expected: Kind) -> Result<&Value, AccessError> {
        let entry = self.get(name).ok_or_else(|| AccessError::Missing(name.to_string()))?;
        if entry.kind() != expected {
            return Err(AccessError::WrongKind {
                name: name.to_string(),
                expected,
                found: entry.kind(),
            });
        }
        Ok(entry.value())
    }

    /// Current text of a string setting; `None` when unset.
    pub fn string(&self, name: &str) -> Result<Option<&str>, AccessError> {
        match self.typed(name, Kind::String)? {
            Value::String(text) => Ok(text.as_deref()),
            other => Err(mismatch(name, Kind::String, other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, AccessError> {
        match self.typed(name, Kind::Integer)? {
            Value::Integer(value) => Ok(*value),
            other => Err(mismatch(name, Kind::Integer, other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, AccessError> {
        match self.typed(name, Kind::Boolean)? {
            Value::Boolean(flag) => Ok(*flag),
            other => Err(mismatch(name, Kind::Boolean, other)),
        }
    }

    pub fn enum_option(&self, name: &str) -> Result<&'static EnumOption, AccessError> {
        match self.typed(name, Kind::Enum)? {
            Value::Enum(option) => Ok(*option),
            other => Err(mismatch(name, Kind::Enum, other)),
        }
    }

    pub fn list(&self, name: &str) -> Result<&[String], AccessError> {
        match self.typed(name, Kind::List)? {
            Value::List(items) => Ok(items.as_slice()),
            other => Err(mismatch(name, Kind::List, other)),
        }
    }
}

fn mismatch(name: &str, expected: Kind, found: &Value) -> AccessError {
    AccessError::WrongKind {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}
