//! # Telegram Generator Error Handling
//!
//! This module defines the TelegenError enum, which represents the different error
//! types that can occur in the mbus-telegen crate.
//!
//! Encoding-level conditions (`UnsupportedSizeClass`, `ZeroWidthField`) are absorbed
//! by the telegram assembler and only shape a single record. Call-level conditions
//! (`MissingExtension`, `InvalidMode`) abort the call that raised them.

use crate::payload::code::Code;
use crate::util::hex::HexError;
use thiserror::Error;

/// Represents the different error types that can occur in the generator crate.
#[derive(Debug, Error)]
pub enum TelegenError {
    /// The DIB size nibble maps to the variable-length or undefined class.
    #[error("Unsupported DIB size class: 0x{0}")]
    UnsupportedSizeClass(Code),

    /// The DIB size nibble maps to a zero-byte data field.
    #[error("DIB 0x{0} carries no data")]
    ZeroWidthField(Code),

    /// Extension mode was selected without an extension code.
    #[error("Extension mode requires an extension code")]
    MissingExtension,

    /// An unrecognized generation mode name.
    #[error("Invalid generation mode: {0}")]
    InvalidMode(String),

    /// A code string that is not one or two hexadecimal digits.
    #[error("Invalid code: {0:?}")]
    InvalidCode(String),

    /// Enumeration was asked for groups of zero codes.
    #[error("Invalid group size: {0}")]
    InvalidGroupSize(usize),

    /// A header or footer template could not be parsed.
    #[error("Invalid frame template: {0}")]
    InvalidTemplate(String),

    /// A manually entered record line could not be parsed.
    #[error("Invalid manual entry: {0}")]
    InvalidManualEntry(String),

    /// Configuration is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Indicates an error on the transport link.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Hex error: {0}")]
    Hex(#[from] HexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TelegenError {
    /// True for the conditions the assembler handles per record.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            TelegenError::UnsupportedSizeClass(_) | TelegenError::ZeroWidthField(_)
        )
    }
}
