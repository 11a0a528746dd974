use crate::graph::graph::Graph;
use crate::search::state::{Activation, ActivationLog};
use crate::search::stats::SearchStatistics;
use std::fmt;

/// Best total found so far, with the opening order that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestResult {
    total: u64,
    schedule: Vec<Activation>,
}

impl BestResult {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn schedule(&self) -> &[Activation] {
        &self.schedule
    }

    #[cfg(test)]
    pub fn log(&self) -> ActivationLog {
        self.schedule.clone().into()
    }

    /// Replaces the incumbent when `total` beats it.
    pub fn offer(&mut self, total: u64, log: &ActivationLog) -> bool {
        if total <= self.total {
            return false;
        }
        self.total = total;
        self.schedule = log.as_slice().to_vec();
        true
    }

    pub fn display<'a>(&'a self, graph: &'a Graph) -> ScheduleDisplay<'a> {
        ScheduleDisplay {
            result: self,
            graph,
        }
    }
}

pub struct ScheduleDisplay<'a> {
    result: &'a BestResult,
    graph: &'a Graph,
}

impl fmt::Display for ScheduleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.result.schedule.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. minute {:>3}  {:<4} rate {:>3}",
                i + 1,
                a.minute,
                self.graph.name(a.valve),
                self.graph.rate(a.valve)
            )?;
        }
        write!(f, "total released: {}", self.result.total)
    }
}

pub struct SearchOutcome {
    pub best: BestResult,
    pub stats: SearchStatistics,
}
