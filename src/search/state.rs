use crate::graph::node::ValveId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation {
    pub valve: ValveId,
    /// minute at which the valve finished opening
    pub minute: u32,
}

impl Activation {
    pub fn new(valve: ValveId, minute: u32) -> Self {
        Self { valve, minute }
    }
}

/// Valves opened so far along one branch, in opening order.
///
/// The search uses the log as a trail: an activation is recorded on the way
/// down and popped on the way back up, so every branch sees exactly its own
/// history without copying it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationLog {
    entries: Vec<Activation>,
}

impl ActivationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `activation` unless its valve is already in the log.
    pub fn record(&mut self, activation: Activation) -> bool {
        if self.contains(activation.valve) {
            return false;
        }
        self.entries.push(activation);
        true
    }

    pub fn pop(&mut self) -> Option<Activation> {
        self.entries.pop()
    }

    pub fn contains(&self, valve: ValveId) -> bool {
        self.entries.iter().any(|a| a.valve == valve)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activation> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Activation] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Activation>> for ActivationLog {
    fn from(entries: Vec<Activation>) -> Self {
        Self { entries }
    }
}

/// One node of the search tree. The activation log lives beside it on the
/// trail, everything else is copied into each child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchState {
    position: ValveId,
    minute: u32,
    /// bit `i` set while the i-th flowing valve is still closed
    eligible: u64,
    /// yield already secured by the activations on the trail
    accrued: u64,
    depth: usize,
}

impl SearchState {
    pub fn initial(origin: ValveId, eligible: u64) -> Self {
        Self {
            position: origin,
            minute: 0,
            eligible,
            accrued: 0,
            depth: 0,
        }
    }

    /// Moves to the valve behind `bit`, opens it and finishes at `minute`.
    pub fn child(&self, bit: usize, valve: ValveId, minute: u32, gain: u64) -> Self {
        debug_assert!(self.is_eligible(bit));
        debug_assert!(minute > self.minute);
        Self {
            position: valve,
            minute,
            eligible: self.eligible & !(1u64 << bit),
            accrued: self.accrued + gain,
            depth: self.depth + 1,
        }
    }

    pub fn is_terminal(&self, budget: u32) -> bool {
        self.eligible == 0 || self.minute > budget
    }

    pub fn is_eligible(&self, bit: usize) -> bool {
        self.eligible & (1u64 << bit) != 0
    }

    pub fn position(&self) -> ValveId {
        self.position
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    #[cfg(test)]
    pub fn eligible(&self) -> u64 {
        self.eligible
    }

    pub fn remaining(&self) -> u32 {
        self.eligible.count_ones()
    }

    pub fn accrued(&self) -> u64 {
        self.accrued
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
