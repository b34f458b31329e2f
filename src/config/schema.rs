//! Flat, typed view of the loaded configuration.
//!
//! [`ServerSettings`] is what the rest of the server reads. It is copied out
//! of the registry once loading succeeds and never changes afterwards.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::registry::{AccessError, Registry};
use crate::config::value::EnumOption;

/// Worker process strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkerType {
    SyncWorker,
    AsyncWorker,
}

impl WorkerType {
    fn from_option(name: &'static str, option: &EnumOption) -> Result<Self, SettingsError> {
        match option.id {
            0 => Ok(WorkerType::SyncWorker),
            1 => Ok(WorkerType::AsyncWorker),
            _ => Err(unknown_option(name, option)),
        }
    }
}

/// Log verbosity, most verbose first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Verbose,
    Notice,
    Warning,
}

impl LogLevel {
    fn from_option(name: &'static str, option: &EnumOption) -> Result<Self, SettingsError> {
        match option.id {
            0 => Ok(LogLevel::Debug),
            1 => Ok(LogLevel::Verbose),
            2 => Ok(LogLevel::Notice),
            3 => Ok(LogLevel::Warning),
            _ => Err(unknown_option(name, option)),
        }
    }
}

fn unknown_option(name: &'static str, option: &EnumOption) -> SettingsError {
    SettingsError::UnknownOption {
        name,
        option: option.name,
        id: option.id,
    }
}

/// Root settings of the server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub protocol: Option<String>,
    pub bind_addr: Option<String>,
    pub port: u16,
    pub worker_number: u32,
    pub worker_type: WorkerType,
    pub logfile: Option<PathBuf>,
    pub log_level: LogLevel,
    pub daemon: bool,
    pub pidfile: Option<PathBuf>,
    pub max_buffer_size: u64,
    pub stat_bind_addr: Option<String>,
    pub stat_port: u16,
    pub stat_refresh_secs: u64,
    pub stat_file: Option<PathBuf>,
    pub worker_timeout_secs: u64,
    pub mbuf_size: u64,
}

/// Errors from copying the registry out into [`ServerSettings`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("`{name}` value {value} does not fit its field")]
    OutOfRange { name: &'static str, value: i64 },

    #[error("`{name}` option `{option}` (id {id}) has no settings counterpart")]
    UnknownOption { name: &'static str, option: &'static str, id: i32 },
}

/// Structural checks run after every setting validated on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("stat-refresh-time ({refresh}) must be less than timeout-seconds ({timeout})")]
    RefreshNotBelowTimeout { refresh: u64, timeout: u64 },

    #[error("port must be nonzero")]
    ZeroPort,

    #[error("stat-port must be nonzero")]
    ZeroStatPort,
}

fn narrow<T: TryFrom<i64>>(registry: &Registry, name: &'static str) -> Result<T, SettingsError> {
    let value = registry.integer(name)?;
    T::try_from(value).map_err(|_| SettingsError::OutOfRange { name, value })
}

fn text(registry: &Registry, name: &str) -> Result<Option<String>, SettingsError> {
    Ok(registry.string(name)?.map(str::to_string))
}

fn path(registry: &Registry, name: &str) -> Result<Option<PathBuf>, SettingsError> {
    Ok(registry.string(name)?.map(PathBuf::from))
}

impl ServerSettings {
    /// Copy every recognised setting out of `registry`.
    pub fn from_registry(registry: &Registry) -> Result<Self, SettingsError> {
        Ok(Self {
            protocol: text(registry, "protocol")?,
            bind_addr: text(registry, "bind-addr")?,
            port: narrow(registry, "port")?,
            worker_number: narrow(registry, "worker-number")?,
            worker_type: WorkerType::from_option("worker-type", registry.enum_option("worker-type")?)?,
            logfile: path(registry, "logfile")?,
            log_level: LogLevel::from_option("logfile-level", registry.enum_option("logfile-level")?)?,
            daemon: registry.boolean("daemon")?,
            pidfile: path(registry, "pidfile")?,
            max_buffer_size: narrow(registry, "max-buffer-size")?,
            stat_bind_addr: text(registry, "stat-bind-addr")?,
            stat_port: narrow(registry, "stat-port")?,
            stat_refresh_secs: narrow(registry, "stat-refresh-time")?,
            stat_file: path(registry, "stat-file")?,
            worker_timeout_secs: narrow(registry, "timeout-seconds")?,
            mbuf_size: narrow(registry, "mbuf-size")?,
        })
    }

    /// Check relations between settings. The first violation is returned.
    pub fn check(&self) -> Result<(), InvariantError> {
        if self.stat_refresh_secs >= self.worker_timeout_secs {
            return Err(InvariantError::RefreshNotBelowTimeout {
                refresh: self.stat_refresh_secs,
                timeout: self.worker_timeout_secs,
            });
        }
        if self.port == 0 {
            return Err(InvariantError::ZeroPort);
        }
        if self.stat_port == 0 {
            return Err(InvariantError::ZeroStatPort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::registry::{
        DEFAULT_ADDR, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_STATS_PORT, VERBOSITY, WORKER_TYPES,
    };
    use crate::config::validation::{validate, Payload};

    fn set(registry: &mut Registry, name: &str, raw: &str) {
        let entry = registry.lookup_mut(name).unwrap();
        validate(entry, name, Payload::Token(raw)).unwrap();
    }

    fn defaults() -> ServerSettings {
        ServerSettings::from_registry(&Registry::with_defaults()).unwrap()
    }

    #[test]
    fn test_defaults_come_from_registry() {
        let settings = defaults();
        assert_eq!(settings.protocol.as_deref(), Some(DEFAULT_PROTOCOL));
        assert_eq!(settings.bind_addr.as_deref(), Some(DEFAULT_ADDR));
        assert_eq!(i64::from(settings.port), DEFAULT_PORT);
        assert_eq!(settings.worker_number, 2);
        assert_eq!(settings.worker_type, WorkerType::SyncWorker);
        assert_eq!(settings.log_level, LogLevel::Notice);
        assert_eq!(settings.logfile, None);
        assert_eq!(i64::from(settings.stat_port), DEFAULT_STATS_PORT);
        assert_eq!(settings.max_buffer_size, 10 * 1024 * 1024);
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_unknown_enum_id_is_reported() {
        static FORKED: EnumOption = EnumOption { id: 7, name: "ForkedWorker" };
        assert_eq!(
            WorkerType::from_option("worker-type", &FORKED),
            Err(SettingsError::UnknownOption {
                name: "worker-type",
                option: "ForkedWorker",
                id: 7,
            })
        );
        assert!(LogLevel::from_option("logfile-level", &FORKED).is_err());
        assert_eq!(LogLevel::from_option("logfile-level", &VERBOSITY[2]), Ok(LogLevel::Notice));
        assert_eq!(WorkerType::from_option("worker-type", &WORKER_TYPES[1]), Ok(WorkerType::AsyncWorker));
    }

    #[test]
    fn test_copies_committed_values() {
        let mut registry = Registry::with_defaults();
        set(&mut registry, "worker-type", "asyncworker");
        set(&mut registry, "logfile-level", "warning");
        set(&mut registry, "logfile", "/var/log/server.log");
        set(&mut registry, "protocol", "NULL");
        set(&mut registry, "daemon", "on");

        let settings = ServerSettings::from_registry(&registry).unwrap();
        assert_eq!(settings.worker_type, WorkerType::AsyncWorker);
        assert_eq!(settings.log_level, LogLevel::Warning);
        assert_eq!(settings.logfile, Some(PathBuf::from("/var/log/server.log")));
        assert_eq!(settings.protocol, None);
        assert!(settings.daemon);
    }

    #[test]
    fn test_missing_setting() {
        let err = ServerSettings::from_registry(&Registry::new()).unwrap_err();
        assert_eq!(err, SettingsError::Access(AccessError::Missing("protocol".into())));
    }

    #[test]
    fn test_check_refresh_below_timeout() {
        let settings = ServerSettings {
            stat_refresh_secs: 30,
            worker_timeout_secs: 30,
            ..defaults()
        };
        assert_eq!(
            settings.check(),
            Err(InvariantError::RefreshNotBelowTimeout { refresh: 30, timeout: 30 })
        );
    }

    #[test]
    fn test_check_ports() {
        let settings = ServerSettings { port: 0, ..defaults() };
        assert_eq!(settings.check(), Err(InvariantError::ZeroPort));

        let settings = ServerSettings { stat_port: 0, ..defaults() };
        assert_eq!(settings.check(), Err(InvariantError::ZeroStatPort));
    }
}
