/// Payload counter of a generator session.
///
/// Advanced once per finished telegram so consecutive telegrams carry
/// distinguishable data. Saturates at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    value: u64,
}

impl Sequencer {
    pub fn new(start: u64) -> Self {
        Sequencer { value: start }
    }

    pub fn current(&self) -> u64 {
        self.value
    }

    pub fn advance(&mut self) -> u64 {
        self.value = self.value.saturating_add(1);
        self.value
    }
}
