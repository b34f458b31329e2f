//! Typed configuration values.
//!
//! A [`Value`] is a closed sum over the five kinds a setting may hold. The
//! kind of an entry is fixed by its compiled-in default and never changes.

use std::fmt;
use std::ops::Deref;

/// Literal that resets a string setting to the unset state.
pub const NULL_SENTINEL: &str = "NULL";

/// A single legal value of an enum-kind setting.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumOption {
    pub id: i32,
    pub name: &'static str,
}

/// Ordered table of legal values. Order decides prefix-match ties.
pub type EnumTable = &'static [EnumOption];

/// Text held by a string setting.
///
/// Compiled-in defaults borrow process-wide constants; anything produced by
/// the parser is owned by the entry and dropped on replacement. Equality
/// compares content only.
#[derive(Debug, Clone)]
pub enum Text {
    Static(&'static str),
    Owned(String),
}

impl Text {
    pub fn as_str(&self) -> &str {
        match self {
            Text::Static(s) => s,
            Text::Owned(s) => s,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Text::Owned(_))
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Text {}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value kinds, used for dispatch and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Integer,
    Boolean,
    Enum,
    List,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Enum => "enum",
            Kind::List => "list",
        };
        f.write_str(name)
    }
}

/// Current value of a configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `None` is the unset state, reachable only through [`NULL_SENTINEL`].
    String(Option<Text>),
    Integer(i64),
    Boolean(bool),
    Enum(&'static EnumOption),
    List(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::Enum(_) => Kind::Enum,
            Value::List(_) => Kind::List,
        }
    }
}
