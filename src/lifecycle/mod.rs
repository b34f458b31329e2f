//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Read config file + overrides → Apply → Validate → Log configuration
//!     Any failure → diagnostic on stderr → exit(1)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: configuration first, logging second
//! - Configuration is never reloaded while serving

pub mod startup;

pub use startup::{load_or_exit, log_configuration, StartupOptions};
