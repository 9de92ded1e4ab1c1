//! In-memory ReliableTXT document

use std::borrow::Borrow;
use std::path::Path;

use crate::char_iter::CharIterator;
use crate::code_points::{from_code_points, to_code_points};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::lines;

/// Text paired with the encoding it is stored in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
    encoding: Encoding,
    read_only: bool,
}

impl Document {
    /// Create a UTF-8 document
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_encoding(text, Encoding::Utf8)
    }

    pub fn with_encoding(text: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            text: text.into(),
            encoding,
            read_only: false,
        }
    }

    /// Mark the document read-only; setters then fail with [`Error::ReadOnly`]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.check_writable()?;
        self.text = text.into();
        Ok(())
    }

    pub fn set_encoding(&mut self, encoding: Encoding) -> Result<()> {
        self.check_writable()?;
        self.encoding = encoding;
        Ok(())
    }

    pub fn code_points(&self) -> Vec<u32> {
        to_code_points(&self.text)
    }

    /// Replace the text with the given code points.
    ///
    /// The document is left untouched if any value is not encodable.
    pub fn set_code_points(&mut self, code_points: &[u32]) -> Result<()> {
        self.check_writable()?;
        self.text = from_code_points(code_points)?;
        Ok(())
    }

    pub fn lines(&self) -> Vec<&str> {
        lines::split(&self.text)
    }

    pub fn set_lines<S: Borrow<str>>(&mut self, lines: &[S]) -> Result<()> {
        self.check_writable()?;
        self.text = lines::join(lines);
        Ok(())
    }

    /// Cursor over a snapshot of the current text
    pub fn char_iter(&self) -> CharIterator {
        CharIterator::new(&self.text)
    }

    /// Preamble followed by the encoded text
    pub fn to_bytes(&self) -> Vec<u8> {
        Encoder::new().encode_with_preamble(&self.text, self.encoding)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (encoding, text) = Decoder::new().decode(bytes)?;
        Ok(Self::with_encoding(text, encoding))
    }

    /// Write the document to `path`, replacing any existing content
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Encoder::new().encode_to_file(&self.text, self.encoding, path.as_ref())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (encoding, text) = Decoder::new().decode_file(path)?;
        tracing::debug!("Loaded {} document from {}", encoding, path.display());
        Ok(Self::with_encoding(text, encoding))
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            Err(Error::ReadOnly)
        } else {
            Ok(())
        }
    }
}
