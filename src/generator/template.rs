//! Header/footer framing around the generated data records.
//!
//! Templates are whitespace separated two-digit hex tokens. One header token
//! may be the length slot `{len}` (or `LL`); it is replaced on every telegram
//! with `record bytes + overhead`, so the template states where the L-field
//! lives instead of relying on a fixed token index.

use crate::constants::LENGTH_SLOT_TOKENS;
use crate::error::TelegenError;
use crate::payload::record::Record;
use crate::util::hex::format_hex_spaced;
use log::warn;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{multispace0, multispace1},
    combinator::{all_consuming, map, map_res},
    multi::separated_list0,
    sequence::delimited,
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Byte(u8),
    LengthSlot,
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        map(alt((tag(LENGTH_SLOT_TOKENS[0]), tag(LENGTH_SLOT_TOKENS[1]))), |_| {
            Token::LengthSlot
        }),
        map(
            map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s: &str| {
                u8::from_str_radix(s, 16)
            }),
            Token::Byte,
        ),
    ))(input)
}

fn tokens(input: &str) -> Result<Vec<Token>, TelegenError> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, token),
        multispace0,
    ))(input)
    .map(|(_, tokens)| tokens)
    .map_err(|e| TelegenError::InvalidTemplate(format!("{input:?}: {e}")))
}

/// Parsed header and footer with an optional length slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTemplate {
    header: Vec<Token>,
    footer: Vec<u8>,
    overhead: Option<u8>,
}

impl FrameTemplate {
    /// Parses header and footer templates. Only the header may hold a slot.
    pub fn parse(header: &str, footer: &str) -> Result<Self, TelegenError> {
        let header = tokens(header)?;
        if header.iter().filter(|t| **t == Token::LengthSlot).count() > 1 {
            return Err(TelegenError::InvalidTemplate(
                "header declares more than one length slot".into(),
            ));
        }

        let footer = tokens(footer)?
            .into_iter()
            .map(|t| match t {
                Token::Byte(b) => Ok(b),
                Token::LengthSlot => Err(TelegenError::InvalidTemplate(
                    "length slot is only allowed in the header".into(),
                )),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(FrameTemplate {
            header,
            footer,
            overhead: None,
        })
    }

    /// Template without framing bytes.
    pub fn bare() -> Self {
        FrameTemplate {
            header: Vec::new(),
            footer: Vec::new(),
            overhead: None,
        }
    }

    /// Fixes the constant added to the record byte count in the length slot.
    pub fn with_overhead(mut self, overhead: u8) -> Self {
        self.overhead = Some(overhead);
        self
    }

    pub fn has_length_slot(&self) -> bool {
        self.header.contains(&Token::LengthSlot)
    }

    /// Constant added to the record bytes. Defaults to the number of template
    /// bytes after the slot.
    pub fn overhead(&self) -> usize {
        if let Some(overhead) = self.overhead {
            return usize::from(overhead);
        }
        let after_slot = self
            .header
            .iter()
            .skip_while(|t| **t != Token::LengthSlot)
            .skip(1)
            .count();
        after_slot + self.footer.len()
    }

    /// Value written into the length slot for `field_bytes` of records.
    pub fn length_value(&self, field_bytes: usize) -> u8 {
        let total = field_bytes + self.overhead();
        if total > usize::from(u8::MAX) {
            warn!("telegram length {total} exceeds one byte, clamped to 0xFF");
        }
        total.min(usize::from(u8::MAX)) as u8
    }

    /// Header bytes with the slot resolved for `field_bytes`.
    pub fn header_bytes(&self, field_bytes: usize) -> Vec<u8> {
        self.header
            .iter()
            .map(|t| match t {
                Token::Byte(b) => *b,
                Token::LengthSlot => self.length_value(field_bytes),
            })
            .collect()
    }

    /// Frames the records into one telegram string.
    pub fn assemble(&self, records: &[Record]) -> String {
        let field_bytes: usize = records.iter().map(Record::byte_count).sum();

        let mut bytes = self.header_bytes(field_bytes);
        for record in records {
            bytes.extend(record.wire_bytes());
        }
        bytes.extend_from_slice(&self.footer);

        format_hex_spaced(&bytes)
    }
}
