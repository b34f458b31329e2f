//! Runtime configuration introspection.
//!
//! # Responsibilities
//! - Answer "describe one setting" queries from control clients
//! - Render all loaded settings as JSON
//!
//! # Design Decisions
//! - Reads committed values only; configuration never reloads while serving
//! - Transport is the caller's concern; handlers take and return plain values

pub mod handlers;

pub use handlers::{describe, snapshot, ConfigQuery, ConfigReply, NO_SUCH_CONFIGURATION};
