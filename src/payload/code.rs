//! DIB and VIB codes as they appear in telegrams.

use crate::constants::MBUS_DATA_RECORD_DIF_MASK_DATA;
use crate::error::TelegenError;
use crate::util::hex::hex_byte;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One 8-bit protocol code, rendered as two uppercase hex digits ("00".."FF").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(pub u8);

impl Code {
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Low nibble of a DIB: selects width and coding of the data field.
    pub const fn size_nibble(self) -> u8 {
        self.0 & MBUS_DATA_RECORD_DIF_MASK_DATA
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl FromStr for Code {
    type Err = TelegenError;

    /// Parses "0C", "0c", "c" or "0x0C".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex_byte(digits)
            .map(Code)
            .map_err(|_| TelegenError::InvalidCode(s.to_string()))
    }
}

impl TryFrom<String> for Code {
    type Error = TelegenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

impl From<u8> for Code {
    fn from(value: u8) -> Self {
        Code(value)
    }
}
