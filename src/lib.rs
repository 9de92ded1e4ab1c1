//! # reliabletxt
//!
//! ReliableTXT text documents: plain text whose encoding is never guessed.
//!
//! Every ReliableTXT document starts with a preamble that identifies its
//! encoding. Decoding detects the preamble, decodes the whole buffer and
//! strips the leading U+FEFF marker the preamble decodes to.
//!
//! ## Supported Encodings
//!
//! | Encoding            | Preamble      |
//! |---------------------|---------------|
//! | UTF-8               | `EF BB BF`    |
//! | UTF-16 (big-endian) | `FE FF`       |
//! | UTF-16 reverse (LE) | `FF FE`       |
//! | UTF-32 (big-endian) | `00 00 FE FF` |
//!
//! UTF-16 reverse and UTF-32 are optional; a [`Decoder`] built with
//! [`EncodingConfig::strict`] refuses them.
//!
//! ## Example
//!
//! ```
//! use reliabletxt::{decode, encode_with_preamble, CharIterator, Encoding};
//!
//! let bytes = encode_with_preamble("ab\ncd", Encoding::Utf16);
//! assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
//!
//! let (encoding, text) = decode(&bytes)?;
//! assert_eq!(encoding, Encoding::Utf16);
//!
//! let mut iter = CharIterator::new(&text);
//! assert!(iter.try_read_char('a'));
//! assert_eq!(iter.line_info().line_position, 1);
//! # Ok::<(), reliabletxt::Error>(())
//! ```
//!
//! ## Errors
//!
//! A buffer without a preamble is [`Error::MissingPreamble`]; a buffer with a
//! preamble but an invalid payload is [`Error::Decoding`]. The two are kept
//! apart so callers can tell "not a ReliableTXT document" from "corrupt
//! ReliableTXT document".

pub mod char_iter;
pub mod code_points;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod encoding;
pub mod error;
pub mod lines;

pub use char_iter::{CharIterator, LineInfo};
pub use code_points::{from_code_points, to_code_points};
pub use decoder::Decoder;
pub use document::Document;
pub use encoder::Encoder;
pub use encoding::{Encoding, EncodingConfig, ParseEncodingError, MARKER, NEW_LINE};
pub use error::{DecodeFault, Error, Result};

/// Encode `text` without a preamble
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    Encoder::new().encode(text, encoding)
}

/// Encode `text` as a complete document, preamble first
pub fn encode_with_preamble(text: &str, encoding: Encoding) -> Vec<u8> {
    Encoder::new().encode_with_preamble(text, encoding)
}

/// Detect the encoding of a document from its preamble
pub fn detect_encoding(bytes: &[u8]) -> Result<Encoding> {
    Decoder::new().detect_encoding(bytes)
}

/// Decode a complete document into its encoding and text
pub fn decode(bytes: &[u8]) -> Result<(Encoding, String)> {
    Decoder::new().decode(bytes)
}
