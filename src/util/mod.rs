//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

use crate::error::DetectError;

/// Decodes bytes as ISO-8859-1: every byte maps to the code point of the same value.
pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encodes text as ISO-8859-1, rejecting characters above U+00FF.
pub(crate) fn latin1_encode(text: &str) -> Result<Vec<u8>, DetectError> {
    text.chars()
        .map(|c| {
            u8::try_from(c).map_err(|_| {
                DetectError::invalid_signature(format!("{c:?} is not a Latin-1 character"))
            })
        })
        .collect()
}

/// Decodes hex digits with an optional `0x` prefix.
pub(crate) fn decode_hex(text: &str) -> Result<Vec<u8>, DetectError> {
    let digits = text.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    hex::decode(digits)
        .map_err(|e| DetectError::invalid_signature(format!("invalid hex {text:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_roundtrip_high_bytes() {
        let text = latin1_decode(&[0x47, 0xE9, 0xFF]);
        assert_eq!(text, "G\u{e9}\u{ff}");
        assert_eq!(latin1_encode(&text).unwrap(), vec![0x47, 0xE9, 0xFF]);
    }

    #[test]
    fn test_latin1_encode_rejects_wide_chars() {
        assert!(latin1_encode("caf\u{e9}").is_ok());
        assert!(latin1_encode("\u{20AC}").is_err());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0x2550").unwrap(), vec![0x25, 0x50]);
        assert_eq!(decode_hex("ffD8").unwrap(), vec![0xFF, 0xD8]);
        assert!(decode_hex("0xF").is_err());
        assert!(decode_hex("zz").is_err());
    }
}
