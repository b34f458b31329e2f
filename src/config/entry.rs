//! Configuration entry declarations.

use crate::config::value::{EnumOption, EnumTable, Kind, Text, Value};

/// Number of tokens (name included) a setting line must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Unbounded,
}

impl Arity {
    /// The required token count, when `count` does not satisfy it.
    pub fn rejects(&self, count: usize) -> Option<usize> {
        match self {
            Arity::Exact(n) if *n != count => Some(*n),
            _ => None,
        }
    }
}

/// Per-entry constraint consulted by the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    /// Inclusive upper bound for integer settings.
    Ceiling(i64),
    /// Legal values of an enum setting.
    Table(EnumTable),
}

/// A named, typed configuration slot.
#[derive(Debug, Clone)]
pub struct Entry {
    name: &'static str,
    arity: Arity,
    value: Value,
    constraint: Constraint,
}

impl Entry {
    /// A string setting. `None` starts it in the unset state.
    pub fn string(name: &'static str, default: Option<&'static str>) -> Self {
        Self {
            name,
            arity: Arity::Exact(2),
            value: Value::String(default.map(Text::Static)),
            constraint: Constraint::None,
        }
    }

    /// An unsigned integer setting, optionally bounded above.
    pub fn integer(name: &'static str, default: i64, ceiling: Option<i64>) -> Self {
        Self {
            name,
            arity: Arity::Exact(2),
            value: Value::Integer(default),
            constraint: ceiling.map_or(Constraint::None, Constraint::Ceiling),
        }
    }

    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            arity: Arity::Exact(2),
            value: Value::Boolean(default),
            constraint: Constraint::None,
        }
    }

    /// An enum setting whose legal values are `table`.
    pub fn enumeration(name: &'static str, table: EnumTable, default: &'static EnumOption) -> Self {
        Self {
            name,
            arity: Arity::Exact(2),
            value: Value::Enum(default),
            constraint: Constraint::Table(table),
        }
    }

    /// A list setting, filled by the `- item` block syntax.
    pub fn list(name: &'static str) -> Self {
        Self {
            name,
            arity: Arity::Unbounded,
            value: Value::List(Vec::new()),
            constraint: Constraint::None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    /// Replace the current value. The old value is dropped here, which
    /// releases owned storage and leaves static constants untouched.
    pub(crate) fn commit(&mut self, value: Value) {
        debug_assert_eq!(self.kind(), value.kind(), "kind of `{}` changed", self.name);
        self.value = value;
    }
}
