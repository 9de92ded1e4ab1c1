//! Code-point cursor over decoded text
//!
//! [`CharIterator`] copies the text into a code point buffer on construction
//! and moves forward only through [`CharIterator::try_read_char`]. Line
//! information is recomputed from the start on every call; it is meant for
//! error reporting, not for hot loops.

use std::fmt;

use crate::encoding::NEW_LINE;

/// Zero-based line and column of a cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineInfo {
    /// Number of `\n` before the cursor
    pub line_index: usize,
    /// Number of code points between the last `\n` (or the start) and the cursor
    pub line_position: usize,
}

impl fmt::Display for LineInfo {
    /// One-based `line:column`, the form editors expect
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_index + 1, self.line_position + 1)
    }
}

impl From<LineInfo> for (usize, usize) {
    fn from(info: LineInfo) -> Self {
        (info.line_index, info.line_position)
    }
}

/// Forward-only cursor over the code points of a text
#[derive(Debug, Clone)]
pub struct CharIterator {
    chars: Vec<char>,
    index: usize,
}

impl CharIterator {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
        }
    }

    /// Cursor position in code points
    pub fn position(&self) -> usize {
        self.index
    }

    /// Line and column of the cursor, counting only U+000A as a line break
    pub fn line_info(&self) -> LineInfo {
        let mut info = LineInfo::default();
        for &c in &self.chars[..self.index] {
            if c == NEW_LINE {
                info.line_index += 1;
                info.line_position = 0;
            } else {
                info.line_position += 1;
            }
        }
        info
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// Whether the code point under the cursor is `c`; false at the end
    pub fn is_char(&self, c: char) -> bool {
        self.chars.get(self.index) == Some(&c)
    }

    /// Consume `c` if it is under the cursor
    pub fn try_read_char(&mut self, c: char) -> bool {
        if !self.is_char(c) {
            return false;
        }
        self.index += 1;
        true
    }
}

impl From<&str> for CharIterator {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
