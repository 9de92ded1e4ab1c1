//! Line splitting and joining on `\n`

use std::borrow::Borrow;

use crate::encoding::NEW_LINE;

/// Split on `\n` only. `\r` stays part of the line; an empty text is one empty line.
pub fn split(text: &str) -> Vec<&str> {
    text.split(NEW_LINE).collect()
}

pub fn join<S: Borrow<str>>(lines: &[S]) -> String {
    lines.join("\n")
}
