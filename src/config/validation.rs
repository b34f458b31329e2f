//! Per-kind value validation.
//!
//! # Responsibilities
//! - Convert raw tokens into typed values
//! - Enforce per-entry constraints (ceilings, enum tables)
//! - Commit the converted value into the entry on success
//!
//! # Design Decisions
//! - One [`Validator`] implementation per [`Kind`], selected by the entry's kind
//! - A rejected value leaves the entry untouched

use thiserror::Error;

use crate::config::entry::{Constraint, Entry};
use crate::config::value::{Kind, Text, Value, NULL_SENTINEL};

/// Longest accepted integer literal, in digits.
pub const MAX_INTEGER_DIGITS: usize = 10;

/// Errors produced when a value is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{key}` expects an unsigned integer, got '{value}'")]
    NotUnsigned { key: String, value: String },

    #[error("`{key}` accepts at most 10 digits, got '{value}'")]
    TooManyDigits { key: String, value: String },

    #[error("`{key}` is limited to {ceiling}, got {value}")]
    AboveCeiling { key: String, value: i64, ceiling: i64 },

    #[error("`{key}` expects 'on' or 'off', got '{value}'")]
    NotBoolean { key: String, value: String },

    #[error("`{key}` has no option matching '{value}'")]
    NoEnumMatch { key: String, value: String },

    #[error("`{key}` is an enum setting without an option table")]
    MissingTable { key: String },

    #[error("`{key}` is a {kind} setting and cannot take a list block")]
    UnexpectedList { key: String, kind: Kind },
}

/// Raw input handed to a validator by the line parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<'a> {
    /// The remainder of a `<name> <value>` line.
    Token(&'a str),
    /// Items collected from a `- item` block.
    List(Vec<String>),
}

/// Conversion and constraint check for one value kind.
pub trait Validator: Sync {
    /// Validate `payload` for `entry`, committing it on success.
    ///
    /// `key` is the name as written in the configuration text.
    fn validate(&self, entry: &mut Entry, key: &str, payload: Payload<'_>) -> Result<(), ValidationError>;
}

pub struct StringValidator;
pub struct IntegerValidator;
pub struct BooleanValidator;
pub struct EnumValidator;
pub struct ListValidator;

/// The validator responsible for `kind`.
pub fn validator_for(kind: Kind) -> &'static dyn Validator {
    match kind {
        Kind::String => &StringValidator,
        Kind::Integer => &IntegerValidator,
        Kind::Boolean => &BooleanValidator,
        Kind::Enum => &EnumValidator,
        Kind::List => &ListValidator,
    }
}

/// Validate through the entry's own kind.
pub fn validate(entry: &mut Entry, key: &str, payload: Payload<'_>) -> Result<(), ValidationError> {
    validator_for(entry.kind()).validate(entry, key, payload)
}

fn token<'a>(entry: &Entry, key: &str, payload: Payload<'a>) -> Result<&'a str, ValidationError> {
    match payload {
        Payload::Token(raw) => Ok(raw),
        Payload::List(_) => Err(ValidationError::UnexpectedList {
            key: key.to_string(),
            kind: entry.kind(),
        }),
    }
}

impl Validator for StringValidator {
    fn validate(&self, entry: &mut Entry, key: &str, payload: Payload<'_>) -> Result<(), ValidationError> {
        let raw = token(entry, key, payload)?;
        let text = if raw.eq_ignore_ascii_case(NULL_SENTINEL) {
            None
        } else {
            Some(Text::Owned(raw.to_string()))
        };
        entry.commit(Value::String(text));
        Ok(())
    }
}

impl Validator for IntegerValidator {
    fn validate(&self, entry: &mut Entry, key: &str, payload: Payload<'_>) -> Result<(), ValidationError> {
        let raw = token(entry, key, payload)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotUnsigned {
                key: key.to_string(),
                value: raw.to_string(),
            });
        }
        if raw.len() > MAX_INTEGER_DIGITS {
            return Err(ValidationError::TooManyDigits {
                key: key.to_string(),
                value: raw.to_string(),
            });
        }

        let value: i64 = raw.parse().map_err(|_| ValidationError::NotUnsigned {
            key: key.to_string(),
            value: raw.to_string(),
        })?;

        if let Constraint::Ceiling(ceiling) = entry.constraint() {
            if ceiling != 0 && value > ceiling {
                return Err(ValidationError::AboveCeiling {
                    key: key.to_string(),
                    value,
                    ceiling,
                });
            }
        }

        entry.commit(Value::Integer(value));
        Ok(())
    }
}

impl Validator for BooleanValidator {
    fn validate(&self, entry: &mut Entry, key: &str, payload: Payload<'_>) -> Result<(), ValidationError> {
        let flag = match token(entry, key, payload)? {
            "on" => true,
            "off" => false,
            other => {
                return Err(ValidationError::NotBoolean {
                    key: key.to_string(),
                    value: other.to_string(),
                })
            }
        };
        entry.commit(Value::Boolean(flag));
        Ok(())
    }
}

impl Validator for EnumValidator {
    fn validate(&self, entry: &mut Entry, key: &str, payload: Payload<'_>) -> Result<(), ValidationError> {
        let raw = token(entry, key, payload)?;
        let Constraint::Table(table) = entry.constraint() else {
            return Err(ValidationError::MissingTable { key: key.to_string() });
        };

        // First option whose name starts the input wins, even if a later
        // option would match more of it.
        let chosen = table.iter().find(|option| {
            raw.get(..option.name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(option.name))
        });

        match chosen {
            Some(option) => {
                entry.commit(Value::Enum(option));
                Ok(())
            }
            None => Err(ValidationError::NoEnumMatch {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

impl Validator for ListValidator {
    fn validate(&self, entry: &mut Entry, _key: &str, payload: Payload<'_>) -> Result<(), ValidationError> {
        let items = match payload {
            Payload::List(items) => items,
            Payload::Token(raw) => vec![raw.to_string()],
        };
        entry.commit(Value::List(items));
        Ok(())
    }
}
