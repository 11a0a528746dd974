#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValveState {
    Closed,
    /// Next on the schedule, will be open at `at`.
    Opening { at: u32 },
    Open { since: u32 },
}

impl ValveState {
    pub fn is_open(&self) -> bool {
        matches!(self, ValveState::Open { .. })
    }
}
