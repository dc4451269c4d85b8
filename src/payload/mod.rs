//! The payload module contains the components that produce the data records
//! of a generated telegram: codes, the DIF size table, the data encoder and
//! the record type itself.

pub mod code;
pub mod data_encoding;
pub mod record;
pub mod size_table;
pub mod vib_names;

pub use code::Code;
pub use data_encoding::{decode_field, encode_bcd, encode_binary, encode_data, EncodedData};
pub use record::{Record, RecordData};
pub use size_table::{size_class, DataFormat, SizeClass, SIZE_TABLE};
pub use vib_names::{lookup_vib, VibInfo};
