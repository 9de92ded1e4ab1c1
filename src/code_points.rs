//! Conversion between text and raw code point values

use crate::error::{Error, Result};

/// Code point values of `text`, one per Unicode scalar value
pub fn to_code_points(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Build text from code point values.
///
/// Surrogates (U+D800..=U+DFFF) and values above U+10FFFF have no encoding in
/// any supported form and are rejected with [`Error::Encoding`].
pub fn from_code_points(code_points: &[u32]) -> Result<String> {
    let mut text = String::with_capacity(code_points.len());
    for (index, &code_point) in code_points.iter().enumerate() {
        let c = char::from_u32(code_point).ok_or(Error::Encoding { code_point, index })?;
        text.push(c);
    }
    Ok(text)
}
