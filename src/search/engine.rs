//! Depth-first search over valve opening orders.

use crate::error::{Result, ValveError};
use crate::graph::distance::DistanceTable;
use crate::graph::graph::Graph;
use crate::graph::node::ValveId;
use crate::search::config::{ExplorationOrder, SearchConfig};
use crate::search::monitor::SearchMonitor;
use crate::search::result::{BestResult, SearchOutcome};
use crate::search::scorer;
use crate::search::state::{Activation, ActivationLog, SearchState};
use crate::search::stats::SearchStatistics;
use std::time::Instant;

/// The eligible set is a `u64` bitmask.
pub const MAX_FLOWING: usize = 64;

pub struct SearchEngine<'a> {
    graph: &'a Graph,
    distances: &'a DistanceTable,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(graph: &'a Graph, distances: &'a DistanceTable, config: SearchConfig) -> Self {
        Self {
            graph,
            distances,
            config,
        }
    }

    pub fn run<M: SearchMonitor>(&self, monitor: &mut M) -> Result<SearchOutcome> {
        let origin = self.graph.require(&self.config.origin)?;
        let flowing = self.graph.flowing();
        if flowing.len() > MAX_FLOWING {
            return Err(ValveError::TooManyValves {
                count: flowing.len(),
                max: MAX_FLOWING,
            });
        }

        let order = exploration_order(self.graph, &flowing, self.config.order);
        let eligible = flowing
            .iter()
            .enumerate()
            .fold(0u64, |mask, (bit, _)| mask | (1u64 << bit));

        let started = Instant::now();
        monitor.on_enter_search(&self.config, flowing.len());

        let mut explorer = Explorer {
            graph: self.graph,
            distances: self.distances,
            config: &self.config,
            flowing: &flowing,
            order: &order,
            log: ActivationLog::new(),
            best: BestResult::default(),
            stats: SearchStatistics::default(),
            monitor,
        };
        explorer.visit(SearchState::initial(origin, eligible))?;

        let Explorer {
            best,
            mut stats,
            monitor,
            ..
        } = explorer;
        stats.time_total = started.elapsed();
        monitor.on_exit_search(&best, &stats);

        Ok(SearchOutcome { best, stats })
    }
}

/// Bit positions of `flowing`, in the order children are tried.
fn exploration_order(graph: &Graph, flowing: &[ValveId], order: ExplorationOrder) -> Vec<usize> {
    let mut bits = (0..flowing.len()).collect::<Vec<usize>>();
    match order {
        ExplorationOrder::Index => {}
        ExplorationOrder::Rate => {
            bits.sort_by_key(|bit| std::cmp::Reverse(graph.rate(flowing[*bit])));
        }
        ExplorationOrder::Reverse => bits.reverse(),
    }
    bits
}

struct Explorer<'e, M> {
    graph: &'e Graph,
    distances: &'e DistanceTable,
    config: &'e SearchConfig,
    /// bit `i` of the eligible mask stands for `flowing[i]`
    flowing: &'e [ValveId],
    order: &'e [usize],
    log: ActivationLog,
    best: BestResult,
    stats: SearchStatistics,
    monitor: &'e mut M,
}

impl<M: SearchMonitor> Explorer<'_, M> {
    fn visit(&mut self, state: SearchState) -> Result<()> {
        self.stats.nodes_explored += 1;
        self.stats.max_depth = self.stats.max_depth.max(state.depth());
        self.monitor.on_descend(&state, &self.stats);

        let budget = self.config.budget;
        if state.is_terminal(budget) {
            self.score_leaf(&state);
            return Ok(());
        }

        let mut descended = false;
        for &bit in self.order {
            if !state.is_eligible(bit) {
                continue;
            }
            let next = self.flowing[bit];
            let minute = state.minute() + self.distances.get(state.position(), next) + 1;
            if self.config.prune_late && minute >= budget {
                self.stats.prunings_late += 1;
                continue;
            }

            let gain = scorer::gain(self.graph.rate(next), minute, budget);
            let child = state.child(bit, next, minute, gain);
            if self.config.bound && self.optimistic(&child) <= self.best.total() {
                self.stats.prunings_bound += 1;
                continue;
            }

            if !self.log.record(Activation::new(next, minute)) {
                return Err(ValveError::DoubleActivation(
                    self.graph.name(next).to_string(),
                ));
            }
            descended = true;
            let outcome = self.visit(child);
            self.log.pop();
            outcome?;
        }

        if !descended {
            self.score_leaf(&state);
        }
        Ok(())
    }

    /// Upper bound on any leaf below `state`: every closed valve is reached
    /// directly from the current position. Direct routes are never longer
    /// than detours, so no real ordering opens a valve earlier than this.
    fn optimistic(&self, state: &SearchState) -> u64 {
        let budget = self.config.budget;
        let row = self.distances.row(state.position());
        let remaining = (0..self.flowing.len())
            .filter(|bit| state.is_eligible(*bit))
            .map(|bit| {
                let valve = self.flowing[bit];
                let minute = state.minute() + row[valve.index()] + 1;
                scorer::gain(self.graph.rate(valve), minute, budget)
            })
            .sum::<u64>();
        state.accrued() + remaining
    }

    fn score_leaf(&mut self, state: &SearchState) {
        self.stats.leaves += 1;
        let total = scorer::score(&self.log, self.graph, self.config.budget);
        debug_assert_eq!(total, state.accrued());
        if self.best.offer(total, &self.log) {
            self.stats.improvements += 1;
            self.monitor.on_improvement(&self.best, &self.stats);
        }
    }
}

/// Measures distances and runs the search in one go.
pub fn solve<M: SearchMonitor>(
    graph: &Graph,
    config: SearchConfig,
    monitor: &mut M,
) -> Result<SearchOutcome> {
    let distances = DistanceTable::measure(graph)?;
    SearchEngine::new(graph, &distances, config).run(monitor)
}
