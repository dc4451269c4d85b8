//! # mbus-telegen - DIB/VIB Test Telegram Generator for M-Bus (Meter-Bus)
//!
//! The mbus-telegen crate produces test telegrams for exercising the data record
//! decoder of an M-Bus device. For every DIB (or VIB) code in a range it builds a
//! data record with deterministic payload, encoded exactly as the DIB size class
//! demands, and frames the records into a telegram with a self-correcting length
//! field.
//!
//! ## Features
//!
//! - Enumerate DIB or VIB code space in groups, honoring exclusion sets
//! - Encode payload integers as binary or BCD fields of 1 to 8 bytes, least
//!   significant byte first, with lossy truncation instead of overflow
//! - Frame records with caller supplied header/footer templates and a named
//!   length slot
//! - Audit records alongside each telegram, serializable as JSON
//! - Send telegrams over a serial port and log timestamped traffic
//!
//! ## Usage
//!
//! ```rust
//! use mbus_telegen::{generate, GenerationMode, GeneratorConfig, Code};
//!
//! let config = GeneratorConfig {
//!     header: String::new(),
//!     exclude_dib: ["05", "06", "07", "0D", "0F"]
//!         .iter()
//!         .map(|c| c.parse::<Code>().unwrap())
//!         .collect(),
//!     ..Default::default()
//! };
//!
//! let batch = generate(&config, GenerationMode::Dib).unwrap();
//! assert_eq!(batch.len(), 2);
//! println!("{}", batch.telegrams[0].wire);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod logging;
pub mod payload;
pub mod transport;
pub mod util;

pub use crate::config::{CodeRange, GeneratorConfig};
pub use crate::error::TelegenError;
pub use crate::logging::{init_logger, log_info};

// Core generator types
pub use generator::{
    enumerate_codes, generate, CodeGroup, FrameTemplate, GenerationMode, GeneratorSession,
    ManualEntry, Sequencer, Telegram, TelegramBatch,
};
pub use payload::{encode_data, Code, DataFormat, EncodedData, Record, RecordData, SizeClass};

// Delivery of generated telegrams
pub use transport::{Direction, StreamTransport, TrafficEntry, Transport};
