//! DIF data field size/format table.
//!
//! The low nibble of a DIB selects how many data bytes follow the VIB and
//! whether they are binary or BCD coded (EN 13757-3, table 4). Classes 0x05
//! (32-bit real) and 0x08 (selection for readout) are treated as a 4-byte
//! binary field and a zero-width field respectively.

use crate::payload::code::Code;

/// Numeric representation of a fixed-width data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Binary,
    Bcd,
}

/// Shape of the data field selected by a DIB size nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// No data bytes follow the VIB.
    Zero,
    /// `width` bytes in the given format.
    Fixed { width: usize, format: DataFormat },
    /// Variable length ("n"), length byte precedes the data.
    Variable,
    /// Reserved / manufacturer specific.
    Invalid,
}

impl SizeClass {
    /// Number of data bytes, `None` for classes that cannot be encoded.
    pub fn width(self) -> Option<usize> {
        match self {
            SizeClass::Zero => Some(0),
            SizeClass::Fixed { width, .. } => Some(width),
            SizeClass::Variable | SizeClass::Invalid => None,
        }
    }
}

const fn bin(width: usize) -> SizeClass {
    SizeClass::Fixed {
        width,
        format: DataFormat::Binary,
    }
}

const fn bcd(width: usize) -> SizeClass {
    SizeClass::Fixed {
        width,
        format: DataFormat::Bcd,
    }
}

/// Size/format class for every DIB size nibble 0x0..=0xF.
pub const SIZE_TABLE: [SizeClass; 16] = [
    SizeClass::Zero,     // 0x00 no data
    bin(1),              // 0x01 8 bit integer
    bin(2),              // 0x02 16 bit integer
    bin(3),              // 0x03 24 bit integer
    bin(4),              // 0x04 32 bit integer
    bin(4),              // 0x05 32 bit real
    bin(6),              // 0x06 48 bit integer
    bin(8),              // 0x07 64 bit integer
    SizeClass::Zero,     // 0x08 selection for readout
    bcd(1),              // 0x09 2 digit BCD
    bcd(2),              // 0x0A 4 digit BCD
    bcd(3),              // 0x0B 6 digit BCD
    bcd(4),              // 0x0C 8 digit BCD
    SizeClass::Variable, // 0x0D variable length
    bcd(6),              // 0x0E 12 digit BCD
    SizeClass::Invalid,  // 0x0F special functions
];

/// Looks up the size class of a DIB, masking it to its low nibble.
pub fn size_class(dib: Code) -> SizeClass {
    SIZE_TABLE[dib.size_nibble() as usize]
}
