//! # M-Bus Data Field Encoding
//!
//! Turns a non-negative payload integer into the exact data bytes a DIB size
//! class calls for. Both codings put the least significant byte first on the
//! wire. Values that do not fit are truncated, never wrapped:
//!
//! - binary fields drop leading *decimal digits* until the number fits
//!   `2^(width*8) - 1`
//! - BCD fields keep only the `width*2` least significant decimal digits
//!
//! The decimal value actually encoded is returned next to the bytes so audit
//! logs show what the device should decode.

use crate::error::TelegenError;
use crate::payload::code::Code;
use crate::payload::size_table::{size_class, DataFormat, SizeClass};
use crate::util::hex::format_hex_spaced;

/// Data bytes for one record plus the decimal value they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedData {
    /// Wire order, least significant byte first.
    pub bytes: Vec<u8>,
    /// Decimal string of the value after truncation.
    pub truncated: String,
}

impl EncodedData {
    /// Space separated uppercase byte tokens, e.g. `"34 12"`.
    pub fn wire(&self) -> String {
        format_hex_spaced(&self.bytes)
    }

    pub fn width(&self) -> usize {
        self.bytes.len()
    }
}

/// Encodes `value` for the data field selected by `dib`.
///
/// Fails with [`TelegenError::UnsupportedSizeClass`] for the variable-length and
/// undefined classes and with [`TelegenError::ZeroWidthField`] when the class
/// carries no data.
pub fn encode_data(dib: Code, value: u64) -> Result<EncodedData, TelegenError> {
    match size_class(dib) {
        SizeClass::Variable | SizeClass::Invalid => Err(TelegenError::UnsupportedSizeClass(dib)),
        SizeClass::Zero => Err(TelegenError::ZeroWidthField(dib)),
        SizeClass::Fixed {
            width,
            format: DataFormat::Binary,
        } => Ok(encode_binary(value, width)),
        SizeClass::Fixed {
            width,
            format: DataFormat::Bcd,
        } => Ok(encode_bcd(value, width)),
    }
}

fn digits_value(digits: &str) -> u128 {
    digits
        .bytes()
        .fold(0u128, |acc, b| acc * 10 + u128::from(b - b'0'))
}

/// Strips leading decimal digits from `value` until it fits in `width` bytes.
///
/// Leading zeros uncovered by the stripping are kept ("1000000" in one byte
/// becomes "000000").
pub fn truncate_decimal_digits(value: u64, width: usize) -> String {
    let max: u128 = (1u128 << (width.min(8) * 8)) - 1;
    let mut digits = value.to_string();
    while digits.len() > 1 && digits_value(&digits) > max {
        digits.remove(0);
    }
    digits
}

/// Binary coding: little-endian integer of exactly `width` bytes.
pub fn encode_binary(value: u64, width: usize) -> EncodedData {
    let truncated = truncate_decimal_digits(value, width);
    // digits_value <= 2^(width*8) - 1 <= u64::MAX after truncation
    let fitted = digits_value(&truncated) as u64;
    let bytes = fitted.to_le_bytes()[..width.min(8)].to_vec();

    EncodedData { bytes, truncated }
}

/// BCD coding: one decimal digit per nibble, `width` bytes, low digits first.
pub fn encode_bcd(value: u64, width: usize) -> EncodedData {
    let nibble_count = width * 2;
    let mut nibbles: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();

    if nibbles.len() > nibble_count {
        nibbles.drain(..nibbles.len() - nibble_count);
    } else {
        let mut padded = vec![0u8; nibble_count - nibbles.len()];
        padded.append(&mut nibbles);
        nibbles = padded;
    }

    let truncated = nibbles
        .iter()
        .fold(0u64, |acc, &d| acc * 10 + u64::from(d))
        .to_string();

    let bytes = nibbles
        .chunks(2)
        .rev()
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect();

    EncodedData { bytes, truncated }
}

/// Reads a wire-order data field back into its integer value.
///
/// Returns `None` for BCD fields holding a nibble above 9.
pub fn decode_field(bytes: &[u8], format: DataFormat) -> Option<u64> {
    match format {
        DataFormat::Binary => Some(
            bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        ),
        DataFormat::Bcd => bytes.iter().rev().try_fold(0u64, |acc, &b| {
            let (hi, lo) = (b >> 4, b & 0x0F);
            if hi > 9 || lo > 9 {
                return None;
            }
            Some(acc * 100 + u64::from(hi) * 10 + u64::from(lo))
        }),
    }
}
