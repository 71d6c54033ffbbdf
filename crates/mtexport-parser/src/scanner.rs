//! Logical line scanning over a buffered reader.
//!
//! Lines are yielded lazily and without their terminator (`\n` or `\r\n`).
//! Everything else, including leading and trailing spaces, is preserved.

use std::io::BufRead;

use crate::{Error, Result};

const BOM: char = '\u{feff}';

/// A single logical line of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// The line content without its terminator.
    pub text: String,
}

/// Iterator over the logical lines of a reader.
///
/// Finite and not restartable: once the reader is exhausted or fails the
/// iterator yields `None`.
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    number: usize,
    done: bool,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
            done: false,
        }
    }

    fn read_next(&mut self) -> Result<Option<Line>> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }
        self.number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let mut text = String::from_utf8(std::mem::take(&mut self.buf))
            .map_err(|_| Error::InvalidEncoding { line: self.number })?;
        if self.number == 1 && text.starts_with(BOM) {
            text.replace_range(..BOM.len_utf8(), "");
        }

        Ok(Some(Line {
            number: self.number,
            text,
        }))
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_next() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
