//! ReliableTXT decoder

use std::path::Path;

use crate::encoding::{Encoding, EncodingConfig, MARKER, PREAMBLES};
use crate::error::{DecodeFault, Error, Result};

/// Detects the preamble of a byte buffer and decodes it to text
pub struct Decoder {
    config: EncodingConfig,
}

impl Decoder {
    /// Create a decoder accepting every supported encoding
    pub fn new() -> Self {
        Self::with_config(EncodingConfig::default())
    }

    /// Create a decoder with custom detection config
    pub fn with_config(config: EncodingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    /// Find the encoding whose preamble starts `bytes`.
    ///
    /// The preamble table is scanned longest entry first. Preambles of
    /// encodings disabled in the config are treated as unknown.
    pub fn detect_encoding(&self, bytes: &[u8]) -> Result<Encoding> {
        PREAMBLES
            .iter()
            .find(|(encoding, preamble)| self.config.allows(*encoding) && bytes.starts_with(preamble))
            .map(|(encoding, _)| *encoding)
            .ok_or_else(|| {
                tracing::trace!("No preamble in {} byte buffer", bytes.len());
                Error::MissingPreamble
            })
    }

    /// Decode a complete document into its encoding and text.
    ///
    /// The returned text excludes the leading marker. Invalid payload bytes
    /// fail with [`Error::Decoding`]; nothing is replaced.
    pub fn decode(&self, bytes: &[u8]) -> Result<(Encoding, String)> {
        let encoding = self.detect_encoding(bytes)?;
        let mut text = decode_text(bytes, encoding).map_err(|(offset, fault)| Error::Decoding {
            encoding,
            offset,
            fault,
        })?;

        // Every preamble decodes to exactly one marker code point
        debug_assert!(text.starts_with(MARKER));
        text.replace_range(..MARKER.len_utf8(), "");

        tracing::debug!("Decoded {} document ({} bytes)", encoding, bytes.len());
        Ok((encoding, text))
    }

    /// Read a whole file and decode it
    pub fn decode_file(&self, path: &Path) -> Result<(Encoding, String)> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.decode(&bytes)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

type DecodeResult = std::result::Result<String, (usize, DecodeFault)>;

/// Decode the entire buffer, preamble included. Errors carry the absolute
/// byte offset of the offending unit.
fn decode_text(bytes: &[u8], encoding: Encoding) -> DecodeResult {
    match encoding {
        Encoding::Utf8 => decode_utf8(bytes),
        Encoding::Utf16 => decode_utf16(bytes, u16::from_be_bytes),
        Encoding::Utf16Reverse => decode_utf16(bytes, u16::from_le_bytes),
        Encoding::Utf32 => decode_utf32(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> DecodeResult {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| (e.valid_up_to(), DecodeFault::InvalidUtf8))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> DecodeResult {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err((bytes.len() - 1, DecodeFault::TruncatedCodeUnit));
    }

    let units = chunks.map(|pair| unit([pair[0], pair[1]]));
    let mut text = String::with_capacity(bytes.len() / 2);
    let mut offset = 0;
    for result in char::decode_utf16(units) {
        let c = result.map_err(|e| (offset, DecodeFault::UnpairedSurrogate(e.unpaired_surrogate())))?;
        offset += c.len_utf16() * 2;
        text.push(c);
    }
    Ok(text)
}

fn decode_utf32(bytes: &[u8]) -> DecodeResult {
    let chunks = bytes.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err((bytes.len() - chunks.remainder().len(), DecodeFault::TruncatedCodeUnit));
    }

    let mut text = String::with_capacity(bytes.len() / 4);
    for (index, quad) in chunks.enumerate() {
        let value = u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]);
        let c = char::from_u32(value).ok_or((index * 4, DecodeFault::InvalidCodePoint(value)))?;
        text.push(c);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;

    fn decode(bytes: &[u8]) -> Result<(Encoding, String)> {
        Decoder::new().decode(bytes)
    }

    #[test]
    fn test_detect_each_encoding() {
        let decoder = Decoder::new();
        assert_eq!(decoder.detect_encoding(&[0xEF, 0xBB, 0xBF, 0x61]).unwrap(), Encoding::Utf8);
        assert_eq!(decoder.detect_encoding(&[0xFE, 0xFF]).unwrap(), Encoding::Utf16);
        assert_eq!(decoder.detect_encoding(&[0xFF, 0xFE, 0x61, 0x00]).unwrap(), Encoding::Utf16Reverse);
        assert_eq!(decoder.detect_encoding(&[0x00, 0x00, 0xFE, 0xFF]).unwrap(), Encoding::Utf32);
    }

    #[test]
    fn test_detect_missing_preamble() {
        let decoder = Decoder::new();
        assert!(matches!(decoder.detect_encoding(b""), Err(Error::MissingPreamble)));
        assert!(matches!(decoder.detect_encoding(b"hello"), Err(Error::MissingPreamble)));
        // Truncated preambles
        assert!(matches!(decoder.detect_encoding(&[0xEF, 0xBB]), Err(Error::MissingPreamble)));
        assert!(matches!(decoder.detect_encoding(&[0xFE]), Err(Error::MissingPreamble)));
        assert!(matches!(decoder.detect_encoding(&[0x00, 0x00, 0xFE]), Err(Error::MissingPreamble)));
    }

    #[test]
    fn test_detect_is_repeatable() {
        let decoder = Decoder::new();
        let bytes = [0xFE, 0xFF, 0x00, 0x61];
        let first = decoder.detect_encoding(&bytes).unwrap();
        let second = decoder.detect_encoding(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_detect_strict_config_rejects_optional() {
        let decoder = Decoder::with_config(EncodingConfig::strict());
        assert!(matches!(decoder.detect_encoding(&[0xFF, 0xFE]), Err(Error::MissingPreamble)));
        assert!(matches!(decoder.detect_encoding(&[0x00, 0x00, 0xFE, 0xFF]), Err(Error::MissingPreamble)));
        assert_eq!(decoder.detect_encoding(&[0xFE, 0xFF]).unwrap(), Encoding::Utf16);
    }

    #[test]
    fn test_decode_preamble_only() {
        for encoding in Encoding::ALL {
            let (detected, text) = decode(encoding.preamble()).unwrap();
            assert_eq!(detected, encoding);
            assert_eq!(text, "");
        }
    }

    #[test]
    fn test_decode_round_trip_all_encodings() {
        let encoder = Encoder::new();
        let text = "Line 1\nä€\u{6771}\n\u{1D11E}\u{20007}\r\n";
        for encoding in Encoding::ALL {
            let bytes = encoder.encode_with_preamble(text, encoding);
            assert_eq!(decode(&bytes).unwrap(), (encoding, text.to_string()));
        }
    }

    #[quickcheck_macros::quickcheck]
    fn prop_round_trip(text: String) -> bool {
        let encoder = Encoder::new();
        let decoder = Decoder::new();
        Encoding::ALL.iter().all(|&encoding| {
            let bytes = encoder.encode_with_preamble(&text, encoding);
            let detected = decoder.detect_encoding(&bytes).ok();
            let detected_again = decoder.detect_encoding(&bytes).ok();
            let decoded = decoder.decode(&bytes).ok();
            detected == Some(encoding) && detected_again == detected && decoded == Some((encoding, text.clone()))
        })
    }

    #[quickcheck_macros::quickcheck]
    fn prop_round_trip_with_leading_marker(text: String) -> bool {
        let text = format!("{}{}", MARKER, text);
        Encoding::ALL.iter().all(|&encoding| {
            let bytes = Encoder::new().encode_with_preamble(&text, encoding);
            decode(&bytes).ok() == Some((encoding, text.clone()))
        })
    }

    #[test]
    fn test_round_trip_sampled_code_points() {
        let mut body: String = (0..=0x10FFFFu32).step_by(97).filter_map(char::from_u32).collect();
        body.extend(['\u{FEFF}', '\0', '\u{FFFE}', '\u{10FFFF}']);

        let encoder = Encoder::new();
        for prefix in ["", "\u{FEFF}", "\0", "\0\0"] {
            let text = format!("{}{}", prefix, body);
            for encoding in Encoding::ALL {
                let bytes = encoder.encode_with_preamble(&text, encoding);
                assert_eq!(decode(&bytes).unwrap(), (encoding, text.clone()), "{} with prefix {:?}", encoding, prefix);
            }
        }
    }

    #[test]
    fn test_decode_strips_only_one_marker() {
        let (_, text) = decode("\u{FEFF}\u{FEFF}a".as_bytes()).unwrap();
        assert_eq!(text, "\u{FEFF}a");
    }

    #[test]
    fn test_decode_missing_preamble() {
        assert!(matches!(decode(b"hello"), Err(Error::MissingPreamble)));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = decode(&[0xEF, 0xBB, 0xBF, 0x61, 0x80]);
        match result {
            Err(Error::Decoding { encoding, offset, fault }) => {
                assert_eq!(encoding, Encoding::Utf8);
                assert_eq!(offset, 4);
                assert_eq!(fault, DecodeFault::InvalidUtf8);
            }
            other => panic!("expected decoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_utf16_odd_length() {
        let result = decode(&[0xFE, 0xFF, 0x00, 0x61, 0x00]);
        assert!(matches!(
            result,
            Err(Error::Decoding { offset: 4, fault: DecodeFault::TruncatedCodeUnit, .. })
        ));
    }

    #[test]
    fn test_decode_utf16_unpaired_surrogate() {
        let result = decode(&[0xFE, 0xFF, 0x00, 0x61, 0xD8, 0x34, 0x00, 0x62]);
        assert!(matches!(
            result,
            Err(Error::Decoding {
                encoding: Encoding::Utf16,
                offset: 4,
                fault: DecodeFault::UnpairedSurrogate(0xD834),
            })
        ));
    }

    #[test]
    fn test_decode_utf16_reverse_lone_low_surrogate() {
        let result = decode(&[0xFF, 0xFE, 0x1E, 0xDD]);
        assert!(matches!(
            result,
            Err(Error::Decoding {
                encoding: Encoding::Utf16Reverse,
                offset: 2,
                fault: DecodeFault::UnpairedSurrogate(0xDD1E),
            })
        ));
    }

    #[test]
    fn test_decode_utf32_invalid_code_point() {
        let result = decode(&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x11, 0x00, 0x00]);
        assert!(matches!(
            result,
            Err(Error::Decoding { offset: 4, fault: DecodeFault::InvalidCodePoint(0x110000), .. })
        ));
    }

    #[test]
    fn test_decode_utf32_truncated() {
        let result = decode(&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x61]);
        assert!(matches!(
            result,
            Err(Error::Decoding { offset: 4, fault: DecodeFault::TruncatedCodeUnit, .. })
        ));
    }

    #[test]
    fn test_decode_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Decoder::new().decode_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
