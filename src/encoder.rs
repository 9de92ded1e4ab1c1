//! ReliableTXT encoder

use std::io::Write;
use std::path::Path;

use crate::code_points::from_code_points;
use crate::encoding::Encoding;
use crate::error::{Error, Result};

/// Encodes text into the byte form of a supported encoding
pub struct Encoder {
    // Stateless; every supported encoding covers all of Unicode
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Encode `text` without a preamble.
    ///
    /// `&str` only holds Unicode scalar values, so this cannot fail. Use
    /// [`Encoder::encode_code_points`] for unchecked input.
    pub fn encode(&self, text: &str, encoding: Encoding) -> Vec<u8> {
        let mut output = Vec::with_capacity(Self::estimate_len(text, encoding));
        Self::encode_into(&mut output, text, encoding);
        output
    }

    /// Encode `text` with the preamble of `encoding` in front, i.e. the full
    /// byte layout of a document
    pub fn encode_with_preamble(&self, text: &str, encoding: Encoding) -> Vec<u8> {
        let preamble = encoding.preamble();
        let mut output = Vec::with_capacity(preamble.len() + Self::estimate_len(text, encoding));
        output.extend_from_slice(preamble);
        Self::encode_into(&mut output, text, encoding);
        output
    }

    /// Encode raw code point values without a preamble.
    ///
    /// Lone surrogates and values above U+10FFFF are rejected with
    /// [`Error::Encoding`].
    pub fn encode_code_points(&self, code_points: &[u32], encoding: Encoding) -> Result<Vec<u8>> {
        let text = from_code_points(code_points)?;
        Ok(self.encode(&text, encoding))
    }

    /// Write a complete document (preamble and text) to a writer
    pub fn encode_to_writer<W: Write>(&self, text: &str, encoding: Encoding, mut writer: W) -> std::io::Result<()> {
        let encoded = self.encode_with_preamble(text, encoding);
        writer.write_all(&encoded)
    }

    /// Write a complete document to a file, truncating existing content
    pub fn encode_to_file(&self, text: &str, encoding: Encoding, path: &Path) -> Result<()> {
        let encoded = self.encode_with_preamble(text, encoding);
        std::fs::write(path, encoded).map_err(|e| Error::io(path, e))?;
        tracing::debug!("Wrote {} document to {}", encoding, path.display());
        Ok(())
    }

    fn encode_into(output: &mut Vec<u8>, text: &str, encoding: Encoding) {
        match encoding {
            Encoding::Utf8 => output.extend_from_slice(text.as_bytes()),
            Encoding::Utf16 => {
                for unit in text.encode_utf16() {
                    output.extend_from_slice(&unit.to_be_bytes());
                }
            }
            Encoding::Utf16Reverse => {
                for unit in text.encode_utf16() {
                    output.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Encoding::Utf32 => {
                for c in text.chars() {
                    output.extend_from_slice(&u32::from(c).to_be_bytes());
                }
            }
        }
    }

    /// Lower bound used for preallocation
    fn estimate_len(text: &str, encoding: Encoding) -> usize {
        match encoding {
            Encoding::Utf8 => text.len(),
            Encoding::Utf16 | Encoding::Utf16Reverse => text.len() * 2,
            Encoding::Utf32 => text.len() * 4,
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
