//! # Hex Encoding/Decoding Utilities
//!
//! Telegrams travel through the generator as space-delimited strings of
//! uppercase byte tokens (`"0C 13 11 11 11 11"`). This module converts between
//! that representation and raw bytes for the transport layer and for tests.
//!
//! ## Usage
//!
//! ```rust
//! use mbus_telegen::util::hex::{decode_hex, format_hex_spaced};
//!
//! let bytes = decode_hex("0C 13 11 11 11 11").unwrap();
//! assert_eq!(bytes, [0x0C, 0x13, 0x11, 0x11, 0x11, 0x11]);
//! assert_eq!(format_hex_spaced(&bytes), "0C 13 11 11 11 11");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex character: {0}")]
    InvalidCharacter(char),

    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),

    #[error("Telegram token {0:?} is not a two-digit hex byte")]
    InvalidToken(String),
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    if let Some(bad) = cleaned.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidCharacter(bad));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Parses a telegram in wire form: whitespace separated two-digit hex bytes.
///
/// Unlike [`decode_hex`], digits are never re-paired across separators, so
/// `"0 C13"` is rejected.
pub fn parse_telegram(telegram: &str) -> Result<Vec<u8>, HexError> {
    let tokens: Vec<&str> = telegram.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(HexError::EmptyString);
    }

    if let Some(bad) = tokens
        .iter()
        .find(|token| token.len() != 2 || !token.chars().all(|c| c.is_ascii_hexdigit()))
    {
        return Err(HexError::InvalidToken(bad.to_string()));
    }

    decode_hex(&tokens.concat())
}

/// Formats data as "0C 13 11 11" with spaces between uppercase bytes.
///
/// This is the wire rendering used for every telegram and record.
pub fn format_hex_spaced(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a single hex byte string to u8
pub fn hex_byte(hex: &str) -> Result<u8, HexError> {
    if hex.is_empty() || hex.len() > 2 {
        return Err(HexError::OddLength(hex.len()));
    }

    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidCharacter(bad));
    }

    u8::from_str_radix(hex, 16).map_err(|e| HexError::DecodeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_whitespace() {
        let expected = vec![0x20, 0x7A, 0x60, 0x32];
        assert_eq!(decode_hex("20 7A 60 32").unwrap(), expected);
        assert_eq!(decode_hex("207a6032").unwrap(), expected);
    }

    #[test]
    fn test_format_spaced() {
        assert_eq!(format_hex_spaced(&[0x0c, 0x13, 0xab]), "0C 13 AB");
        assert_eq!(format_hex_spaced(&[]), "");
    }

    #[test]
    fn test_hex_byte() {
        assert_eq!(hex_byte("0C").unwrap(), 0x0C);
        assert_eq!(hex_byte("ff").unwrap(), 0xFF);
        assert_eq!(hex_byte("7").unwrap(), 0x07);
        assert_eq!(hex_byte("G1"), Err(HexError::InvalidCharacter('G')));
        assert_eq!(hex_byte("123"), Err(HexError::OddLength(3)));
    }

    #[test]
    fn test_parse_telegram() {
        assert_eq!(
            parse_telegram(" 1B 50 1b 51 01 ").unwrap(),
            vec![0x1B, 0x50, 0x1B, 0x51, 0x01]
        );
        assert_eq!(
            parse_telegram("0 C13"),
            Err(HexError::InvalidToken("0".into()))
        );
        assert_eq!(
            parse_telegram("0C13"),
            Err(HexError::InvalidToken("0C13".into()))
        );
        assert_eq!(parse_telegram("0C G1"), Err(HexError::InvalidToken("G1".into())));
        assert_eq!(parse_telegram(""), Err(HexError::EmptyString));
    }

    #[test]
    fn test_errors() {
        assert_eq!(decode_hex(""), Err(HexError::EmptyString));
        assert_eq!(decode_hex("   "), Err(HexError::EmptyString));
        assert_eq!(decode_hex("1"), Err(HexError::OddLength(1)));
        assert_eq!(decode_hex("GG"), Err(HexError::InvalidCharacter('G')));
    }
}
