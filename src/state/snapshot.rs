use crate::graph::node::ValveId;
use crate::state::valve_state::ValveState;

pub struct Snapshot {
    minute: u32,
    position: ValveId,
    /// total released up to `minute`
    released: u64,
    /// released per minute from `minute` on
    flow: u64,
    valve_states: Vec<ValveState>,
}

impl Snapshot {
    pub fn new(
        minute: u32,
        position: ValveId,
        released: u64,
        flow: u64,
        valve_states: Vec<ValveState>,
    ) -> Self {
        Self {
            minute,
            position,
            released,
            flow,
            valve_states,
        }
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn position(&self) -> ValveId {
        self.position
    }

    pub fn released(&self) -> u64 {
        self.released
    }

    pub fn flow(&self) -> u64 {
        self.flow
    }

    pub fn valve_states(&self) -> &[ValveState] {
        &self.valve_states
    }

    pub fn open_count(&self) -> usize {
        self.valve_states.iter().filter(|s| s.is_open()).count()
    }
}
