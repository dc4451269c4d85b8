//! Manual record entry.
//!
//! Parses one hand-typed `DIB VIB DATA [EXT]` line (for example `0C 13 1234`)
//! and builds a single-record telegram with the same encoder and framing the
//! batch generator uses.

use crate::error::TelegenError;
use crate::generator::session::{GeneratorSession, Telegram};
use crate::generator::template::FrameTemplate;
use crate::payload::code::Code;
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, preceded, tuple},
    IResult,
};

/// A parsed manual entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualEntry {
    pub dib: Code,
    pub vib: Code,
    pub data: u64,
    pub extension: Option<Code>,
}

fn code(input: &str) -> IResult<&str, Code> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()), |s: &str| {
        s.parse::<Code>()
    })(input)
}

fn entry(input: &str) -> IResult<&str, ManualEntry> {
    let (rest, (dib, _, vib, _, data, extension)) = tuple((
        code,
        space1,
        code,
        space1,
        map_res(digit1, |s: &str| s.parse::<u64>()),
        opt(preceded(space1, code)),
    ))(input)?;
    Ok((
        rest,
        ManualEntry {
            dib,
            vib,
            data,
            extension,
        },
    ))
}

impl ManualEntry {
    pub fn parse(line: &str) -> Result<Self, TelegenError> {
        all_consuming(delimited(space0, entry, space0))(line.trim_end_matches(['\r', '\n']))
            .map(|(_, entry)| entry)
            .map_err(|_| {
                TelegenError::InvalidManualEntry(format!(
                    "{line:?}, expected `DIB VIB DATA [EXT]`"
                ))
            })
    }

    /// Encodes the entry into one framed telegram.
    pub fn to_telegram(&self, template: &FrameTemplate) -> Telegram {
        let mut session = GeneratorSession::new(self.dib, self.vib, self.data, template.clone());
        session.build_single(self.dib, self.vib, self.extension)
    }
}

/// True for the lines that end a manual entry loop.
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}
