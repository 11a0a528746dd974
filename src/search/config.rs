/// Order in which a state's eligible valves are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorationOrder {
    /// Valve id order.
    #[default]
    Index,
    /// Highest rate first, ties by id.
    Rate,
    Reverse,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub origin: String,
    /// minutes available for travelling and opening
    pub budget: u32,
    /// Skip moves that finish opening at or after the deadline.
    pub prune_late: bool,
    /// Skip moves whose optimistic estimate cannot beat the incumbent.
    pub bound: bool,
    pub order: ExplorationOrder,
}

impl SearchConfig {
    pub const DEFAULT_ORIGIN: &'static str = "AA";
    pub const DEFAULT_BUDGET: u32 = 30;

    pub fn new(origin: impl Into<String>, budget: u32) -> Self {
        Self {
            origin: origin.into(),
            budget,
            ..Self::default()
        }
    }

    /// Plain depth-first enumeration of every ordering, no pruning at all.
    #[cfg(test)]
    pub fn exhaustive(mut self) -> Self {
        self.prune_late = false;
        self.bound = false;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origin: Self::DEFAULT_ORIGIN.to_string(),
            budget: Self::DEFAULT_BUDGET,
            prune_late: true,
            bound: true,
            order: ExplorationOrder::default(),
        }
    }
}
