use crate::graph::graph::Graph;
use crate::graph::node::ValveId;
use crate::search::result::BestResult;
use crate::state::snapshot::Snapshot;
use crate::state::valve_state::ValveState;
use std::mem;

/// Walks a finished schedule minute by minute.
pub struct ReplayEngine {
    graph: Graph,
    origin: ValveId,
    budget: u32,
    best: BestResult,
    previous_snapshot: Option<Snapshot>,
    current_snapshot: Snapshot,
}

impl ReplayEngine {
    pub fn new(graph: Graph, origin: ValveId, budget: u32, best: BestResult) -> Self {
        let current_snapshot = snapshot_at(&graph, origin, &best, 0, 0);
        Self {
            graph,
            origin,
            budget,
            best,
            previous_snapshot: None,
            current_snapshot,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn best(&self) -> &BestResult {
        &self.best
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn is_finished(&self) -> bool {
        self.current_snapshot.minute() >= self.budget
    }

    /// Advances one minute. Valves open at the start of the minute release
    /// their rate during it. Returns false once the deadline is reached.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        let minute = self.current_snapshot.minute() + 1;
        let released = self.current_snapshot.released() + self.current_snapshot.flow();
        let next = snapshot_at(&self.graph, self.origin, &self.best, minute, released);

        let old_snapshot = mem::replace(&mut self.current_snapshot, next);
        self.previous_snapshot = Some(old_snapshot);
        true
    }

    pub fn run_to_end(&mut self) {
        while self.step() {}
    }

    pub fn reset(&mut self) {
        self.previous_snapshot = None;
        self.current_snapshot = snapshot_at(&self.graph, self.origin, &self.best, 0, 0);
    }

    pub fn current_snapshot(&self) -> &Snapshot {
        &self.current_snapshot
    }

    pub fn previous_snapshot(&self) -> &Snapshot {
        self.previous_snapshot
            .as_ref()
            .unwrap_or(&self.current_snapshot)
    }

    /// Pressure released during the last step, zero before the first one.
    pub fn released_last_step(&self) -> u64 {
        self.current_snapshot.released() - self.previous_snapshot().released()
    }

    /// Share of the network's total rate that is currently flowing.
    pub fn flow_utilization(&self) -> f64 {
        let total = self.graph.total_rate();
        if total > 0 {
            self.current_snapshot.flow() as f64 / total as f64
        } else {
            0.0
        }
    }
}

fn snapshot_at(
    graph: &Graph,
    origin: ValveId,
    best: &BestResult,
    minute: u32,
    released: u64,
) -> Snapshot {
    let mut valve_states = vec![ValveState::Closed; graph.valve_count()];
    let mut position = origin;
    let mut heading = None;

    for a in best.schedule() {
        if a.minute <= minute {
            valve_states[a.valve.index()] = ValveState::Open { since: a.minute };
            position = a.valve;
        } else if heading.is_none() {
            heading = Some(*a);
        }
    }
    if let Some(a) = heading {
        valve_states[a.valve.index()] = ValveState::Opening { at: a.minute };
    }

    let flow = valve_states
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_open())
        .map(|(i, _)| graph.rate(ValveId(i)) as u64)
        .sum();

    Snapshot::new(minute, position, released, flow, valve_states)
}
