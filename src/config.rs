//! Generator configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config file.
//! The CLI loads a file (optional) and then applies its own flags on top.

use crate::constants::*;
use crate::error::TelegenError;
use crate::generator::template::FrameTemplate;
use crate::logging::log_warn;
use crate::payload::code::Code;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Inclusive code range of one enumeration axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRange {
    pub lower: u8,
    pub upper: u8,
}

impl CodeRange {
    pub const fn new(lower: u8, upper: u8) -> Self {
        CodeRange { lower, upper }
    }
}

fn default_dib() -> Code {
    Code(DEFAULT_DIB)
}

fn default_vib() -> Code {
    Code(DEFAULT_VIB)
}

fn default_data() -> u64 {
    DEFAULT_DATA
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

fn default_dib_range() -> CodeRange {
    CodeRange::new(DIB_LOWER_LIMIT, DIB_UPPER_LIMIT)
}

fn default_vib_range() -> CodeRange {
    CodeRange::new(VIB_LOWER_LIMIT, VIB_UPPER_LIMIT)
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}

/// Settings of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// DIB held fixed in VIB modes
    #[serde(default = "default_dib")]
    pub dib: Code,

    /// VIB held fixed in DIB mode
    #[serde(default = "default_vib")]
    pub vib: Code,

    /// Payload of the first telegram
    #[serde(default = "default_data")]
    pub data: u64,

    #[serde(default)]
    pub exclude_dib: BTreeSet<Code>,

    #[serde(default)]
    pub exclude_vib: BTreeSet<Code>,

    #[serde(default = "default_group_size")]
    pub dib_group_size: usize,

    #[serde(default = "default_group_size")]
    pub vib_group_size: usize,

    #[serde(default = "default_dib_range")]
    pub dib_range: CodeRange,

    #[serde(default = "default_vib_range")]
    pub vib_range: CodeRange,

    /// Header template, may contain one `{len}` slot
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_footer")]
    pub footer: String,

    /// Constant added to the record bytes in the length slot
    #[serde(default)]
    pub length_overhead: Option<u8>,

    /// VIFE used by the extension mode
    #[serde(default)]
    pub extension: Option<Code>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            dib: default_dib(),
            vib: default_vib(),
            data: default_data(),
            exclude_dib: BTreeSet::new(),
            exclude_vib: BTreeSet::new(),
            dib_group_size: default_group_size(),
            vib_group_size: default_group_size(),
            dib_range: default_dib_range(),
            vib_range: default_vib_range(),
            header: default_header(),
            footer: default_footer(),
            length_overhead: None,
            extension: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, TelegenError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, TelegenError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, TelegenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses header and footer into a frame template.
    pub fn frame_template(&self) -> Result<FrameTemplate, TelegenError> {
        let template = FrameTemplate::parse(&self.header, &self.footer)?;
        Ok(match self.length_overhead {
            Some(overhead) => template.with_overhead(overhead),
            None => template,
        })
    }

    pub fn validate(&self) -> Result<(), TelegenError> {
        for size in [self.dib_group_size, self.vib_group_size] {
            if size == 0 {
                return Err(TelegenError::InvalidGroupSize(size));
            }
        }
        for (axis, range) in [("DIB", self.dib_range), ("VIB", self.vib_range)] {
            if range.lower > range.upper {
                return Err(TelegenError::Config(format!(
                    "{axis} range lower limit 0x{:02X} is above upper limit 0x{:02X}",
                    range.lower, range.upper
                )));
            }
        }
        if self.length_overhead.is_some() && !self.frame_template()?.has_length_slot() {
            log_warn("length_overhead is set but the header has no length slot");
        }
        self.frame_template().map(|_| ())
    }
}
