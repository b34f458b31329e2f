//! Canonical `name: value` rendering of entries.

use std::fmt::Write;

use crate::config::entry::Entry;
use crate::config::registry::Registry;
use crate::config::value::{Value, NULL_SENTINEL};

/// Size of a runtime query reply.
pub const REPLY_LIMIT: usize = 255;

pub const DUMP_HEADER: &str = "---- Current configuration ----";
pub const DUMP_FOOTER: &str = "-------------------------------";

/// Render `entry` without any size limit.
///
/// Values print in a form the parser accepts back: unset strings as
/// `NULL`, booleans as `on`/`off`, list items each followed by a tab.
pub fn render(entry: &Entry) -> String {
    let mut out = format!("{}: ", entry.name());
    match entry.value() {
        Value::String(Some(text)) => out.push_str(text),
        Value::String(None) => out.push_str(NULL_SENTINEL),
        Value::Integer(value) => {
            let _ = write!(out, "{value}");
        }
        Value::Boolean(flag) => out.push_str(if *flag { "on" } else { "off" }),
        Value::Enum(option) => out.push_str(option.name),
        Value::List(items) => {
            for item in items {
                out.push_str(item);
                out.push('\t');
            }
        }
    }
    out
}

/// Render `entry` into at most `limit` bytes.
///
/// Lists stop before the first item that does not fit, so a truncated
/// reply never ends mid-item. Other kinds are cut at the limit.
pub fn render_bounded(entry: &Entry, limit: usize) -> String {
    if let Value::List(items) = entry.value() {
        let mut out = format!("{}: ", entry.name());
        truncate(&mut out, limit);
        for item in items {
            if out.len() + item.len() + 1 > limit {
                break;
            }
            out.push_str(item);
            out.push('\t');
        }
        return out;
    }

    let mut out = render(entry);
    truncate(&mut out, limit);
    out
}

/// Every entry in registration order, between banner lines.
pub fn dump(registry: &Registry) -> Vec<String> {
    let mut lines = Vec::with_capacity(registry.len() + 2);
    lines.push(DUMP_HEADER.to_string());
    lines.extend(registry.iter().map(|entry| render_bounded(entry, REPLY_LIMIT)));
    lines.push(DUMP_FOOTER.to_string());
    lines
}

fn truncate(out: &mut String, limit: usize) {
    if out.len() <= limit {
        return;
    }
    let mut end = limit;
    while !out.is_char_boundary(end) {
        end -= 1;
    }
    out.truncate(end);
}
