//! Typed configuration registry and line-format loader for a server process.

pub mod admin;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigContext, LoadError, Registry, ServerSettings};
