//! Parser for the Movable Type blog export format.
//!
//! An export is a line-oriented text file. Entries are separated by a
//! `--------` line; each entry holds `KEY: value` fields and multi-line
//! blocks (`BODY:`, `COMMENT:`, ...) terminated by a `-----` line.
//!
//! [`parse`] turns a whole stream into a `Vec<EntryStmt>` in one pass. It
//! does not interpret field values; that is left to the caller.

pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;

pub use ast::{EntryStmt, FieldStmt, MultilineSectionStmt, NormalSectionStmt, SectionStmt};
pub use error::{Error, Result};
pub use parser::{
    BLOCK_CLOSE, BUILTIN_MULTILINE_KEYS, ENTRY_BOUNDARY, MultilineKeys, parse, parse_str,
};
