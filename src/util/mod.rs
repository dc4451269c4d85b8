//! # Utility Modules
//!
//! Common helpers shared by the generator and the transport layer.

pub mod hex;

pub use hex::{decode_hex, format_hex_spaced, hex_byte, parse_telegram, HexError};
