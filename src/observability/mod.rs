//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Loaded ServerSettings
//!     → logging.rs (level from logfile-level, sink from logfile)
//!
//! All subsystems produce:
//!     → tracing events (structured fields, no string formatting)
//! ```

pub mod logging;
