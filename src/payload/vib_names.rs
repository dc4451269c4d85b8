//! Quantity names for primary VIB codes (EN 13757-3, table 10).
//!
//! Only used to annotate generated records; the generator itself treats VIB
//! codes as opaque.

use crate::constants::MBUS_DIB_VIF_WITHOUT_EXTENSION;
use crate::payload::code::Code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibInfo {
    pub quantity: &'static str,
    pub unit: &'static str,
}

// (first, last, quantity, base unit); the range exponent lives in the low bits
const VIB_RANGES: &[(u8, u8, &str, &str)] = &[
    (0x00, 0x07, "Energy", "Wh"),
    (0x08, 0x0F, "Energy", "J"),
    (0x10, 0x17, "Volume", "m^3"),
    (0x18, 0x1F, "Mass", "kg"),
    (0x20, 0x23, "On time", "s"),
    (0x24, 0x27, "Operating time", "s"),
    (0x28, 0x2F, "Power", "W"),
    (0x30, 0x37, "Power", "J/h"),
    (0x38, 0x3F, "Volume flow", "m^3/h"),
    (0x40, 0x47, "Volume flow", "m^3/min"),
    (0x48, 0x4F, "Volume flow", "m^3/s"),
    (0x50, 0x57, "Mass flow", "kg/h"),
    (0x58, 0x5B, "Flow temperature", "°C"),
    (0x5C, 0x5F, "Return temperature", "°C"),
    (0x60, 0x63, "Temperature difference", "K"),
    (0x64, 0x67, "External temperature", "°C"),
    (0x68, 0x6B, "Pressure", "bar"),
    (0x6C, 0x6C, "Date", "-"),
    (0x6D, 0x6D, "Date and time", "-"),
    (0x6E, 0x6E, "Units for H.C.A.", "-"),
    (0x70, 0x73, "Averaging duration", "s"),
    (0x74, 0x77, "Actuality duration", "s"),
    (0x78, 0x78, "Fabrication number", "-"),
    (0x79, 0x79, "Enhanced identification", "-"),
    (0x7A, 0x7A, "Bus address", "-"),
    (0x7B, 0x7B, "Extension table FB", "-"),
    (0x7C, 0x7C, "Plain text VIF", "-"),
    (0x7D, 0x7D, "Extension table FD", "-"),
    (0x7E, 0x7E, "Any VIF", "-"),
    (0x7F, 0x7F, "Manufacturer specific", "-"),
];

/// Looks up a VIB, ignoring the extension bit. `None` for reserved codes.
pub fn lookup_vib(vib: Code) -> Option<VibInfo> {
    let code = vib.value() & MBUS_DIB_VIF_WITHOUT_EXTENSION;
    VIB_RANGES
        .iter()
        .find(|(first, last, _, _)| (*first..=*last).contains(&code))
        .map(|&(_, _, quantity, unit)| VibInfo { quantity, unit })
}
