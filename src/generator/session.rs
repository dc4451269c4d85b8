//! # Telegram Generator Session
//!
//! A [`GeneratorSession`] holds the fixed DIB and VIB, the payload counter and
//! the frame template for one run. For every enumerated [`CodeGroup`] it builds
//! one telegram: one record per code, the enumerated code taking the place of
//! the DIB or the VIB depending on the [`GenerationMode`]. The data field is
//! always sized by the record's DIB.
//!
//! Records whose DIB carries no data or cannot be encoded are still emitted as
//! DIB/VIB pairs, so a run never stops on a single bad code.

use crate::config::GeneratorConfig;
use crate::error::TelegenError;
use crate::generator::enumerator::{enumerate_codes, CodeGroup};
use crate::generator::sequencer::Sequencer;
use crate::generator::template::FrameTemplate;
use crate::payload::code::Code;
use crate::payload::data_encoding::encode_data;
use crate::payload::record::{Record, RecordData, UNSUPPORTED_DIAGNOSTIC};
use crate::util::hex::parse_telegram;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which axis is enumerated and which is held fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GenerationMode {
    /// VIB fixed, one record per enumerated DIB.
    Dib,
    /// DIB fixed, one record per enumerated VIB.
    VibPrimary,
    /// As `VibPrimary` with an extension code after every VIB.
    VibExtension,
}

impl GenerationMode {
    pub fn enumerates_dib(self) -> bool {
        self == GenerationMode::Dib
    }

    pub fn needs_extension(self) -> bool {
        self == GenerationMode::VibExtension
    }
}

impl FromStr for GenerationMode {
    type Err = TelegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dib" => Ok(GenerationMode::Dib),
            "vib" | "vib_primary" | "primary" => Ok(GenerationMode::VibPrimary),
            "vib_ext" | "vib_extension" | "vib_single_extension" | "extension" => {
                Ok(GenerationMode::VibExtension)
            }
            _ => Err(TelegenError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationMode::Dib => "DIB",
            GenerationMode::VibPrimary => "VIB_primary",
            GenerationMode::VibExtension => "VIB_single_extension",
        })
    }
}

/// One generated telegram and the records it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Telegram {
    /// Space separated uppercase byte tokens.
    pub wire: String,
    pub records: Vec<Record>,
    /// Payload value before truncation.
    pub payload: u64,
}

impl Telegram {
    /// Audit lines, one per record.
    pub fn audit(&self) -> String {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| record.audit_line(i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Audit lines annotated with the VIB quantity, as printed by the CLI.
    pub fn describe(&self) -> String {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| record.annotated_line(i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn flagged_records(&self) -> usize {
        self.records.iter().filter(|r| r.data.is_flagged()).count()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TelegenError> {
        Ok(parse_telegram(&self.wire)?)
    }
}

/// Telegrams of one generation call, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TelegramBatch {
    pub mode: Option<GenerationMode>,
    pub telegrams: Vec<Telegram>,
}

impl TelegramBatch {
    pub fn len(&self) -> usize {
        self.telegrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.telegrams.is_empty()
    }

    pub fn telegram_strings(&self) -> Vec<&str> {
        self.telegrams.iter().map(|t| t.wire.as_str()).collect()
    }

    /// Record lists parallel to [`Self::telegram_strings`].
    pub fn records(&self) -> Vec<&[Record]> {
        self.telegrams.iter().map(|t| t.records.as_slice()).collect()
    }

    pub fn flagged_records(&self) -> usize {
        self.telegrams.iter().map(Telegram::flagged_records).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Telegram> {
        self.telegrams.iter()
    }
}

/// State of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorSession {
    dib: Code,
    vib: Code,
    sequencer: Sequencer,
    template: FrameTemplate,
}

impl GeneratorSession {
    pub fn new(dib: Code, vib: Code, start: u64, template: FrameTemplate) -> Self {
        GeneratorSession {
            dib,
            vib,
            sequencer: Sequencer::new(start),
            template,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, TelegenError> {
        Ok(Self::new(
            config.dib,
            config.vib,
            config.data,
            config.frame_template()?,
        ))
    }

    pub fn dib(&self) -> Code {
        self.dib
    }

    pub fn vib(&self) -> Code {
        self.vib
    }

    /// Payload the next telegram will carry.
    pub fn payload(&self) -> u64 {
        self.sequencer.current()
    }

    /// Encodes the current payload into a record sized by `dib`.
    pub fn record(&self, dib: Code, vib: Code, extension: Option<Code>) -> Record {
        let data = match encode_data(dib, self.payload()) {
            Ok(encoded) => RecordData::from(encoded),
            Err(TelegenError::ZeroWidthField(_)) => RecordData::ZeroWidth,
            Err(e) => {
                warn!("DIB {dib} VIB {vib}: {e}");
                RecordData::Unsupported {
                    diagnostic: UNSUPPORTED_DIAGNOSTIC.to_string(),
                }
            }
        };
        Record::new(dib, vib, extension, data)
    }

    /// Frames `records` with the current payload and advances the counter.
    fn finish(&mut self, records: Vec<Record>) -> Telegram {
        let telegram = Telegram {
            wire: self.template.assemble(&records),
            records,
            payload: self.payload(),
        };
        debug!("telegram {}: {}", telegram.payload, telegram.wire);
        self.sequencer.advance();
        telegram
    }

    /// Builds one telegram per group, pairing each enumerated code with the
    /// fixed code of the other axis.
    ///
    /// Fails with [`TelegenError::MissingExtension`] before producing anything
    /// when extension mode has no extension code.
    pub fn build_telegrams(
        &mut self,
        mode: GenerationMode,
        groups: &[CodeGroup],
        extension: Option<Code>,
    ) -> Result<TelegramBatch, TelegenError> {
        let extension = match (mode.needs_extension(), extension) {
            (true, None) => return Err(TelegenError::MissingExtension),
            (true, ext) => ext,
            (false, _) => None,
        };

        let mut telegrams = Vec::with_capacity(groups.len());
        for group in groups {
            let records = group
                .codes()
                .iter()
                .map(|&code| {
                    if mode.enumerates_dib() {
                        self.record(code, self.vib, extension)
                    } else {
                        self.record(self.dib, code, extension)
                    }
                })
                .collect();
            telegrams.push(self.finish(records));
        }

        let batch = TelegramBatch {
            mode: Some(mode),
            telegrams,
        };
        info!(
            "{mode}: generated {} telegrams, {} flagged records",
            batch.len(),
            batch.flagged_records()
        );
        Ok(batch)
    }

    /// Builds a single-record telegram from explicitly given codes.
    pub fn build_single(&mut self, dib: Code, vib: Code, extension: Option<Code>) -> Telegram {
        let record = self.record(dib, vib, extension);
        self.finish(vec![record])
    }
}

/// Enumerates the axis selected by `mode` and generates the telegrams for it.
pub fn generate(
    config: &GeneratorConfig,
    mode: GenerationMode,
) -> Result<TelegramBatch, TelegenError> {
    config.validate()?;
    if mode.needs_extension() && config.extension.is_none() {
        return Err(TelegenError::MissingExtension);
    }

    let groups = if mode.enumerates_dib() {
        enumerate_codes(
            config.dib_range.lower,
            config.dib_range.upper,
            config.dib_group_size,
            &config.exclude_dib,
        )?
    } else {
        enumerate_codes(
            config.vib_range.lower,
            config.vib_range.upper,
            config.vib_group_size,
            &config.exclude_vib,
        )?
    };

    let mut session = GeneratorSession::from_config(config)?;
    session.build_telegrams(mode, &groups, config.extension)
}
