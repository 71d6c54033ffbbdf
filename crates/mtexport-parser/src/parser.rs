//! Statement building for Movable Type exports.
//!
//! The export is a flat sequence of lines; structure comes from two sentinel
//! lines and from `KEY:` headers whose key is registered as multi-line:
//! ```text
//! TITLE: Hello
//! CATEGORY: rust
//! -----
//! BODY:
//! body text
//! -----
//! --------
//! ```

use std::collections::BTreeSet;
use std::io::{BufReader, Read};
use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{EntryStmt, FieldStmt, MultilineSectionStmt, NormalSectionStmt, SectionStmt};
use crate::scanner::{Line, Lines};
use crate::{Error, Result};

/// Line that terminates an entry.
pub const ENTRY_BOUNDARY: &str = "--------";

/// Line that terminates a multi-line block.
pub const BLOCK_CLOSE: &str = "-----";

/// Keys that always open a multi-line block when their value is empty.
pub const BUILTIN_MULTILINE_KEYS: &[&str] = &[
    "BODY",
    "EXTENDED BODY",
    "EXCERPT",
    "KEYWORDS",
    "COMMENT",
    "PING",
];

/// `KEY: value`, where the single space after the colon is optional.
static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z](?:[A-Za-z0-9 _-]*[A-Za-z0-9_-])?): ?(.*)$")
        .expect("Invalid field regex")
});

/// The set of keys treated as multi-line block headers for one parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilineKeys {
    keys: BTreeSet<String>,
}

impl MultilineKeys {
    /// The built-in key set.
    pub fn builtin() -> Self {
        Self {
            keys: BUILTIN_MULTILINE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Add export-specific keys (e.g. `IMAGE`) on top of the current set.
    pub fn with_extra<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl Default for MultilineKeys {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug)]
enum State {
    AwaitingEntry,
    InEntryHeader,
    InMultilineBody {
        key: String,
        start_line: usize,
        body: String,
        lines: usize,
    },
}

/// Single-pass builder. Owns every in-progress buffer for one parse call.
struct Builder<'k> {
    keys: &'k MultilineKeys,
    state: State,
    entries: Vec<EntryStmt>,
    sections: Vec<SectionStmt>,
    fields: Vec<FieldStmt>,
}

impl<'k> Builder<'k> {
    fn new(keys: &'k MultilineKeys) -> Self {
        Self {
            keys,
            state: State::AwaitingEntry,
            entries: Vec::new(),
            sections: Vec::new(),
            fields: Vec::new(),
        }
    }

    fn feed(&mut self, line: Line) -> Result<()> {
        if line.text == ENTRY_BOUNDARY {
            if let State::InMultilineBody {
                key, start_line, ..
            } = &self.state
            {
                return Err(Error::UnterminatedBlock {
                    key: key.clone(),
                    start_line: *start_line,
                    line: line.number,
                });
            }
            self.close_entry();
            return Ok(());
        }

        if let State::InMultilineBody {
            key, body, lines, ..
        } = &mut self.state
        {
            if line.text == BLOCK_CLOSE {
                let section = MultilineSectionStmt::new(mem::take(key), mem::take(body));
                self.sections.push(section.into());
                self.state = State::InEntryHeader;
            } else {
                if *lines > 0 {
                    body.push('\n');
                }
                body.push_str(&line.text);
                *lines += 1;
            }
            return Ok(());
        }

        let Some(caps) = FIELD_REGEX.captures(&line.text) else {
            if !line.text.trim().is_empty() && line.text != BLOCK_CLOSE {
                tracing::debug!(line = line.number, text = %line.text, "Skipping unrecognized line");
            }
            return Ok(());
        };

        let key = &caps[1];
        let value = &caps[2];

        if value.trim().is_empty() && self.keys.contains(key) {
            self.close_fields();
            self.state = State::InMultilineBody {
                key: key.to_string(),
                start_line: line.number,
                body: String::new(),
                lines: 0,
            };
        } else {
            self.fields.push(FieldStmt::new(key, value));
            self.state = State::InEntryHeader;
        }

        Ok(())
    }

    fn close_fields(&mut self) {
        if !self.fields.is_empty() {
            let section = NormalSectionStmt::new(mem::take(&mut self.fields));
            self.sections.push(section.into());
        }
    }

    fn close_entry(&mut self) {
        self.close_fields();
        self.entries.push(EntryStmt::new(mem::take(&mut self.sections)));
        self.state = State::AwaitingEntry;
    }

    fn finish(mut self) -> Result<Vec<EntryStmt>> {
        match &self.state {
            State::InMultilineBody {
                key, start_line, ..
            } => {
                return Err(Error::UnexpectedEof {
                    key: key.clone(),
                    start_line: *start_line,
                });
            }
            State::InEntryHeader => self.close_entry(),
            State::AwaitingEntry => {}
        }
        Ok(self.entries)
    }
}

/// Parses a complete export into its entries.
///
/// The reader is consumed and dropped before returning, on success and on
/// failure. On a structural error no entries are returned.
///
/// # Example
/// ```
/// use mtexport_parser::{MultilineKeys, parse};
///
/// let input = "TITLE: Hello\nBODY:\nline one\n-----\n--------\n";
/// let entries = parse(input.as_bytes(), &MultilineKeys::builtin()).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].field("TITLE"), Some("Hello"));
/// assert_eq!(entries[0].multiline("BODY").unwrap().body, "line one");
/// ```
pub fn parse<R: Read>(reader: R, keys: &MultilineKeys) -> Result<Vec<EntryStmt>> {
    let mut builder = Builder::new(keys);
    for line in Lines::new(BufReader::new(reader)) {
        builder.feed(line?)?;
    }
    let entries = builder.finish()?;
    tracing::debug!(entries = entries.len(), "Parsed export");
    Ok(entries)
}

/// Parses an in-memory export.
pub fn parse_str(input: &str, keys: &MultilineKeys) -> Result<Vec<EntryStmt>> {
    parse(input.as_bytes(), keys)
}
