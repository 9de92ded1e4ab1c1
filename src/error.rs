//! Error types

use std::io;
use std::path::PathBuf;

use crate::encoding::Encoding;

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while encoding, decoding or mutating ReliableTXT documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The buffer does not start with any recognised preamble
    #[error("document does not have a ReliableTXT preamble")]
    MissingPreamble,

    /// The preamble was recognised but the bytes after it are invalid
    #[error("invalid {encoding} data at byte {offset}: {fault}")]
    Decoding {
        encoding: Encoding,
        offset: usize,
        fault: DecodeFault,
    },

    /// A code point has no representation in any supported encoding
    #[error("code point {code_point:#06X} at index {index} cannot be encoded")]
    Encoding { code_point: u32, index: usize },

    #[error("document is read-only")]
    ReadOnly,

    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// What exactly was wrong with an invalid payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFault {
    /// Malformed or truncated UTF-8 sequence
    #[error("malformed UTF-8 sequence")]
    InvalidUtf8,

    /// Buffer ends in the middle of a code unit
    #[error("truncated code unit")]
    TruncatedCodeUnit,

    #[error("unpaired surrogate {0:#06X}")]
    UnpairedSurrogate(u16),

    /// UTF-32 value that is not a Unicode scalar value
    #[error("invalid code point {0:#X}")]
    InvalidCodePoint(u32),
}
