//! Line-oriented configuration text parser.
//!
//! Parses the `<name> <value>` line format plus the multi-line list block:
//!
//! ```text
//! upstreams
//! - 10.0.0.1:80
//! - 10.0.0.2:80
//! ```

/// Characters removed from both ends of every line.
const STRIP: &[char] = &['\t', '\n', '\r', ' '];

/// A significant (non-blank, non-comment) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based position in the combined text.
    pub number: usize,
    /// The line as written, before stripping.
    pub raw: &'a str,
    /// The stripped line.
    pub text: &'a str,
}

/// Classification of a line inside a list block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item<'a> {
    Value(&'a str),
    /// Blank, or a lone `-` marker.
    Empty,
    Malformed,
}

/// Cursor over the lines of a configuration text.
#[derive(Debug)]
pub struct LineParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            pos: 0,
        }
    }

    /// Advance to the next significant line, skipping blanks and comments.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        while let Some(&raw) = self.lines.get(self.pos) {
            self.pos += 1;
            let text = strip(raw);
            if is_ignored(text) {
                continue;
            }
            return Some(Line {
                number: self.pos,
                raw,
                text,
            });
        }
        None
    }

    /// Consume the `- item` lines following a bare list name.
    ///
    /// Stops in front of the first line that is not an item, leaving it to
    /// be read by the next [`next_line`](Self::next_line) call. Blank lines
    /// and bare `-` markers are consumed without producing an item.
    pub fn take_list_block(&mut self) -> Vec<String> {
        let mut items = Vec::new();
        while let Some(&raw) = self.lines.get(self.pos) {
            match classify_item(strip(raw)) {
                Item::Value(value) => items.push(value.to_string()),
                Item::Empty => {}
                Item::Malformed => break,
            }
            self.pos += 1;
        }
        items
    }
}

pub fn strip(line: &str) -> &str {
    line.trim_matches(STRIP)
}

/// Blank lines and `#` comments carry no setting.
pub fn is_ignored(stripped: &str) -> bool {
    stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with(' ')
}

/// Split a stripped line into the setting name and the rest of the line.
///
/// Only the first space separates, so a value keeps its embedded spaces
/// and a line never yields more than two tokens.
pub fn tokenize(stripped: &str) -> Vec<&str> {
    stripped.splitn(2, ' ').collect()
}

fn classify_item(stripped: &str) -> Item<'_> {
    let mut marked = false;
    for (at, ch) in stripped.char_indices() {
        match ch {
            ' ' => {}
            '-' if !marked => marked = true,
            '-' => return Item::Malformed,
            _ if marked => return Item::Value(&stripped[at..]),
            _ => return Item::Malformed,
        }
    }
    Item::Empty
}
