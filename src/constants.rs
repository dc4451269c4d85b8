//! Generator Constants
//!
//! DIF masks from the EN 13757-3 data record layout, and the defaults the
//! telegram generator starts from when nothing else is configured.

/// DIF (Data Information Field) mask for data length and coding
pub const MBUS_DATA_RECORD_DIF_MASK_DATA: u8 = 0x0F;

/// VIF without extension
pub const MBUS_DIB_VIF_WITHOUT_EXTENSION: u8 = 0x7F;

/// Default fixed DIB (32-bit, 8 digit BCD)
pub const DEFAULT_DIB: u8 = 0x0C;

/// Default fixed VIB (volume, m^3)
pub const DEFAULT_VIB: u8 = 0x13;

/// Default starting payload
pub const DEFAULT_DATA: u64 = 11_111_111;

/// Default number of codes per enumerated group
pub const DEFAULT_GROUP_SIZE: usize = 8;

/// Default header: L C M M A CI of a wireless frame
pub const DEFAULT_HEADER: &str = "20 7A 60 32 00 00";

/// Default footer
pub const DEFAULT_FOOTER: &str = "";

// DIB axis covers one size-class nibble
pub const DIB_LOWER_LIMIT: u8 = 0x00;
pub const DIB_UPPER_LIMIT: u8 = 0x0F;

// VIB axis covers the primary VIF table
pub const VIB_LOWER_LIMIT: u8 = 0x00;
pub const VIB_UPPER_LIMIT: u8 = MBUS_DIB_VIF_WITHOUT_EXTENSION;

/// Placeholder tokens marking the length byte in a header template
pub const LENGTH_SLOT_TOKENS: [&str; 2] = ["{len}", "LL"];

/// Serial defaults used by the transmit terminal (8N1)
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Terminal preset "Confirm 01"
pub const CONFIRM_01_FRAME: &str = "1B 50 1B 51 01";
