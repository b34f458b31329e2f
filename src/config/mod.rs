//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file + inline overrides (concatenated, overrides last)
//!     → parser.rs (logical lines, `<name> <value>` tokens, list blocks)
//!     → registry.rs (case-insensitive prefix lookup)
//!     → validation.rs (per-kind conversion, commit into the entry)
//!     → schema.rs (flat ServerSettings + structural checks)
//!     → ConfigContext handed to the rest of the server
//!
//! On demand:
//!     format.rs renders any entry as `name: value`
//! ```
//!
//! # Design Decisions
//! - Every setting has a compiled-in default; the text only overrides
//! - The first bad line aborts the load; earlier lines stay applied
//! - Configuration is loaded once at startup and read-only afterwards

pub mod entry;
pub mod format;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod validation;
pub mod value;

pub use entry::{Arity, Constraint, Entry};
pub use loader::{load, load_config, ConfigContext, LineError, LoadError, Reason};
pub use registry::Registry;
pub use schema::{InvariantError, LogLevel, ServerSettings, WorkerType};
pub use validation::{Payload, ValidationError, Validator};
pub use value::{EnumOption, EnumTable, Kind, Text, Value};
