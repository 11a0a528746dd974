use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total states visited, the root included.
    pub nodes_explored: u64,
    /// States that were scored.
    pub leaves: u64,
    /// Times the best total went up.
    pub improvements: u64,
    /// Moves skipped because the valve would open at or after the deadline.
    pub prunings_late: u64,
    /// Moves skipped because even an optimistic finish could not win.
    pub prunings_bound: u64,
    pub max_depth: usize,
    pub time_total: Duration,
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes explored : {}", self.nodes_explored)?;
        writeln!(f, "leaves scored  : {}", self.leaves)?;
        writeln!(f, "improvements   : {}", self.improvements)?;
        writeln!(f, "pruned (late)  : {}", self.prunings_late)?;
        writeln!(f, "pruned (bound) : {}", self.prunings_bound)?;
        writeln!(f, "max depth      : {}", self.max_depth)?;
        write!(f, "time           : {:.3}s", self.time_total.as_secs_f64())
    }
}
