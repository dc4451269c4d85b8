//! Generated data records and their audit rendering.
//!
//! A record is the DIB, the VIB, an optional extension code and the encoded
//! data field. Records that could not be encoded keep their DIB and VIB on
//! the wire and carry a diagnostic instead of data.

use crate::payload::code::Code;
use crate::payload::data_encoding::EncodedData;
use crate::payload::vib_names::lookup_vib;
use crate::util::hex::format_hex_spaced;
use serde::Serialize;
use std::fmt;

/// Audit text for a record whose DIB carries no data.
pub const ZERO_WIDTH_DIAGNOSTIC: &str = "Data not transformed, size is 0";

/// Audit text for a record whose DIB size class cannot be encoded.
pub const UNSUPPORTED_DIAGNOSTIC: &str = "Data not transformed, DIB not recognized";

/// Data field of a generated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordData {
    /// Encoded bytes (wire order) and the decimal value they carry.
    Encoded { bytes: Vec<u8>, value: String },
    /// The DIB selects a zero-byte field; nothing follows the VIB.
    ZeroWidth,
    /// The DIB size class cannot be encoded; nothing follows the VIB.
    Unsupported { diagnostic: String },
}

impl From<EncodedData> for RecordData {
    fn from(encoded: EncodedData) -> Self {
        RecordData::Encoded {
            bytes: encoded.bytes,
            value: encoded.truncated,
        }
    }
}

impl RecordData {
    pub fn bytes(&self) -> &[u8] {
        match self {
            RecordData::Encoded { bytes, .. } => bytes,
            RecordData::ZeroWidth | RecordData::Unsupported { .. } => &[],
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, RecordData::Unsupported { .. })
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Encoded { value, .. } => f.write_str(value),
            RecordData::ZeroWidth => f.write_str(ZERO_WIDTH_DIAGNOSTIC),
            RecordData::Unsupported { diagnostic } => f.write_str(diagnostic),
        }
    }
}

/// One DIB/VIB/data triple of a generated telegram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub dib: Code,
    pub vib: Code,
    /// VIFE inserted between the VIB and the data field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Code>,
    pub data: RecordData,
}

impl Record {
    pub fn new(dib: Code, vib: Code, extension: Option<Code>, data: RecordData) -> Self {
        Record {
            dib,
            vib,
            extension,
            data,
        }
    }

    /// DIB, VIB, optional extension and data bytes in wire order.
    pub fn wire_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.dib.value(), self.vib.value()];
        if let Some(ext) = self.extension {
            out.push(ext.value());
        }
        out.extend_from_slice(self.data.bytes());
        out
    }

    /// Bytes this record contributes to the telegram length.
    pub fn byte_count(&self) -> usize {
        2 + usize::from(self.extension.is_some()) + self.data.bytes().len()
    }

    pub fn wire(&self) -> String {
        format_hex_spaced(&self.wire_bytes())
    }

    /// VIB as shown in audit output, extension appended when present.
    pub fn vib_label(&self) -> String {
        match self.extension {
            Some(ext) => format!("{} {}", self.vib, ext),
            None => self.vib.to_string(),
        }
    }

    /// Audit line for the record at 1-based `index` within its telegram.
    pub fn audit_line(&self, index: usize) -> String {
        format!(
            "DIB_{index} = {} VIB_{index} = {} Data_{index} = {}",
            self.dib,
            self.vib_label(),
            self.data
        )
    }

    /// Quantity and unit of the VIB, for human readable dumps.
    pub fn quantity(&self) -> Option<String> {
        lookup_vib(self.vib).map(|info| format!("{} [{}]", info.quantity, info.unit))
    }

    /// Audit line followed by the VIB quantity, e.g. `... (Volume [m^3])`.
    pub fn annotated_line(&self, index: usize) -> String {
        match self.quantity() {
            Some(quantity) => format!("{} ({quantity})", self.audit_line(index)),
            None => self.audit_line(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(bytes: &[u8], value: &str) -> RecordData {
        RecordData::Encoded {
            bytes: bytes.to_vec(),
            value: value.to_string(),
        }
    }

    #[test]
    fn wire_and_count_with_data() {
        let record = Record::new(Code(0x0C), Code(0x13), None, encoded(&[0x11; 4], "11111111"));
        assert_eq!(record.wire(), "0C 13 11 11 11 11");
        assert_eq!(record.byte_count(), 6);
        assert_eq!(
            record.audit_line(1),
            "DIB_1 = 0C VIB_1 = 13 Data_1 = 11111111"
        );
    }

    #[test]
    fn extension_sits_between_vib_and_data() {
        let record = Record::new(
            Code(0x0C),
            Code(0x93),
            Some(Code(0x3C)),
            encoded(&[0x42, 0x00, 0x00, 0x00], "42"),
        );
        assert_eq!(record.wire(), "0C 93 3C 42 00 00 00");
        assert_eq!(record.byte_count(), 7);
        assert_eq!(record.audit_line(2), "DIB_2 = 0C VIB_2 = 93 3C Data_2 = 42");
    }

    #[test]
    fn short_records() {
        let zero = Record::new(Code(0x00), Code(0x13), None, RecordData::ZeroWidth);
        assert_eq!(zero.wire(), "00 13");
        assert_eq!(zero.byte_count(), 2);
        assert!(zero.audit_line(1).ends_with(ZERO_WIDTH_DIAGNOSTIC));
        assert!(!zero.data.is_flagged());

        let bad = Record::new(
            Code(0x0D),
            Code(0x13),
            None,
            RecordData::Unsupported {
                diagnostic: UNSUPPORTED_DIAGNOSTIC.to_string(),
            },
        );
        assert_eq!(bad.wire(), "0D 13");
        assert!(bad.data.is_flagged());
    }

    #[test]
    fn serializes_for_audit_files() {
        let record = Record::new(Code(0x0A), Code(0x13), None, encoded(&[0x34, 0x12], "1234"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dib"], "0A");
        assert_eq!(json["vib"], "13");
        assert_eq!(json["data"]["kind"], "encoded");
        assert_eq!(json["data"]["value"], "1234");
        assert!(json.get("extension").is_none());
    }

    #[test]
    fn quantity_of_volume_vib() {
        let record = Record::new(Code(0x0C), Code(0x13), None, RecordData::ZeroWidth);
        assert_eq!(record.quantity().as_deref(), Some("Volume [m^3]"));
    }
}
