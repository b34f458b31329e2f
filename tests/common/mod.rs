//! Shared utilities for configuration tests.

use std::io::Write;

use serverconf::config::Entry;
use serverconf::Registry;
use tempfile::NamedTempFile;

/// Write `contents` to a temporary config file.
pub fn write_config(contents: impl AsRef<[u8]>) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_ref()).unwrap();
    file.flush().unwrap();
    file
}

/// Default registry plus a list setting and a free-form string setting.
#[allow(dead_code)]
pub fn registry_with_list() -> Registry {
    let mut registry = Registry::with_defaults();
    registry
        .register(Entry::list("mylist"))
        .register(Entry::string("other-setting", None));
    registry
}

/// The value part of a rendered `name: value` line.
#[allow(dead_code)]
pub fn value_part(rendered: &str) -> &str {
    rendered.split_once(": ").map_or("", |(_, value)| value)
}
