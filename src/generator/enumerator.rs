//! Code space enumeration.
//!
//! Walks an inclusive code range in windows of `group_size` codes and keeps
//! the codes not excluded. Each non-empty window becomes one [`CodeGroup`],
//! which later becomes one telegram.

use crate::error::TelegenError;
use crate::payload::code::Code;
use std::collections::BTreeSet;

/// Codes of one enumeration window that survived exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGroup {
    count: usize,
    codes: Vec<Code>,
}

impl CodeGroup {
    pub fn new(codes: Vec<Code>) -> Self {
        CodeGroup {
            count: codes.len(),
            codes,
        }
    }

    /// Member count prefix.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Count followed by the codes, e.g. `["3", "00", "01", "02"]`.
    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(self.count.to_string())
            .chain(self.codes.iter().map(Code::to_string))
            .collect()
    }
}

/// Enumerates `lower..=upper` in windows of `group_size` codes.
///
/// Windows are clamped to `upper`; windows left empty by `exclusions` are
/// dropped. An inverted range yields no groups.
pub fn enumerate_codes(
    lower: u8,
    upper: u8,
    group_size: usize,
    exclusions: &BTreeSet<Code>,
) -> Result<Vec<CodeGroup>, TelegenError> {
    if group_size == 0 {
        return Err(TelegenError::InvalidGroupSize(group_size));
    }

    let upper = u16::from(upper);
    let groups = (u16::from(lower)..=upper)
        .step_by(group_size)
        .filter_map(|start| {
            let end = usize::from(start)
                .saturating_add(group_size - 1)
                .min(usize::from(upper));
            let codes: Vec<Code> = (usize::from(start)..=end)
                .map(|value| Code(value as u8))
                .filter(|code| !exclusions.contains(code))
                .collect();
            (!codes.is_empty()).then(|| CodeGroup::new(codes))
        })
        .collect();

    Ok(groups)
}
