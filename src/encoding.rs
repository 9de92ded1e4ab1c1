//! Supported encodings and their preambles

use std::fmt;
use std::str::FromStr;

/// Code point every preamble decodes to; stripped from decoded text
pub const MARKER: char = '\u{FEFF}';

/// The only line separator ReliableTXT recognises
pub const NEW_LINE: char = '\n';

pub const UTF8_PREAMBLE: [u8; 3] = [0xEF, 0xBB, 0xBF];
pub const UTF16_PREAMBLE: [u8; 2] = [0xFE, 0xFF];
pub const UTF16_REVERSE_PREAMBLE: [u8; 2] = [0xFF, 0xFE];
pub const UTF32_PREAMBLE: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Preamble table in detection order.
///
/// Longer preambles come first so that adding UTF-32LE (`FF FE 00 00`) later
/// only requires inserting it ahead of UTF-16 reverse.
pub(crate) static PREAMBLES: [(Encoding, &[u8]); 4] = [
    (Encoding::Utf32, &UTF32_PREAMBLE),
    (Encoding::Utf8, &UTF8_PREAMBLE),
    (Encoding::Utf16, &UTF16_PREAMBLE),
    (Encoding::Utf16Reverse, &UTF16_REVERSE_PREAMBLE),
];

/// Encoding of a ReliableTXT document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8
    #[default]
    Utf8,
    /// UTF-16 big-endian
    Utf16,
    /// UTF-16 little-endian (optional)
    Utf16Reverse,
    /// UTF-32 big-endian (optional)
    Utf32,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Utf8,
        Encoding::Utf16,
        Encoding::Utf16Reverse,
        Encoding::Utf32,
    ];

    /// Byte sequence every document in this encoding starts with
    #[inline]
    pub const fn preamble(self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &UTF8_PREAMBLE,
            Encoding::Utf16 => &UTF16_PREAMBLE,
            Encoding::Utf16Reverse => &UTF16_REVERSE_PREAMBLE,
            Encoding::Utf32 => &UTF32_PREAMBLE,
        }
    }

    /// Canonical lowercase name, accepted back by [`Encoding::from_str`]
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16 => "utf-16",
            Encoding::Utf16Reverse => "utf-16-reverse",
            Encoding::Utf32 => "utf-32",
        }
    }

    /// Whether a reader may refuse this encoding and still be conforming
    pub const fn is_optional(self) -> bool {
        matches!(self, Encoding::Utf16Reverse | Encoding::Utf32)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16 => "UTF-16",
            Encoding::Utf16Reverse => "UTF-16LE",
            Encoding::Utf32 => "UTF-32",
        };
        f.write_str(label)
    }
}

/// Returned when an encoding name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown encoding '{0}', expected one of: utf-8, utf-16, utf-16-reverse, utf-32")]
pub struct ParseEncodingError(String);

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-16" | "utf16" | "utf-16be" | "utf-16-be" => Ok(Encoding::Utf16),
            "utf-16-reverse" | "utf-16le" | "utf-16-le" => Ok(Encoding::Utf16Reverse),
            "utf-32" | "utf32" | "utf-32be" | "utf-32-be" => Ok(Encoding::Utf32),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

/// Configuration for preamble detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingConfig {
    /// Accept UTF-16 little-endian documents
    pub allow_utf16_reverse: bool,
    /// Accept UTF-32 big-endian documents
    pub allow_utf32: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            allow_utf16_reverse: true,
            allow_utf32: true,
        }
    }
}

impl EncodingConfig {
    /// Only the mandatory encodings (UTF-8 and UTF-16)
    pub fn strict() -> Self {
        Self {
            allow_utf16_reverse: false,
            allow_utf32: false,
        }
    }

    pub fn allows(&self, encoding: Encoding) -> bool {
        match encoding {
            Encoding::Utf8 | Encoding::Utf16 => true,
            Encoding::Utf16Reverse => self.allow_utf16_reverse,
            Encoding::Utf32 => self.allow_utf32,
        }
    }
}
