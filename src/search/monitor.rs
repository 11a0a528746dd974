use crate::search::config::SearchConfig;
use crate::search::result::BestResult;
use crate::search::state::SearchState;
use crate::search::stats::SearchStatistics;
use std::time::{Duration, Instant};

/// Hooks called by the search engine while it walks the tree.
pub trait SearchMonitor {
    /// Called once before the root is visited.
    fn on_enter_search(&mut self, config: &SearchConfig, flowing: usize);

    /// Called on every state, before it is expanded or scored.
    fn on_descend(&mut self, state: &SearchState, stats: &SearchStatistics);

    /// Called whenever a leaf beats the best total.
    fn on_improvement(&mut self, best: &BestResult, stats: &SearchStatistics);

    /// Called once after the tree is exhausted.
    fn on_exit_search(&mut self, best: &BestResult, stats: &SearchStatistics);

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {
    #[inline(always)]
    fn on_enter_search(&mut self, _config: &SearchConfig, _flowing: usize) {}

    #[inline(always)]
    fn on_descend(&mut self, _state: &SearchState, _stats: &SearchStatistics) {}

    #[inline(always)]
    fn on_improvement(&mut self, _best: &BestResult, _stats: &SearchStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _best: &BestResult, _stats: &SearchStatistics) {}

    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

/// Writes a progress table to stderr.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    /// the clock is only read when `nodes_explored & mask == 0`
    clock_check_mask: u64,
    best_total: u64,
    flowing: usize,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_total: 0,
            flowing: 0,
        }
    }

    fn closed_after(&self, best: &BestResult) -> u32 {
        self.flowing.saturating_sub(best.schedule().len()) as u32
    }

    fn print_header(&self) {
        eprintln!(
            "{:<9} | {:<12} | {:<6} | {:<8} | {:<6} | {:<10} | {:<12} | {:<12}",
            "Elapsed", "Nodes", "Depth", "Minute", "Closed", "Best", "Pruned late", "Pruned bound"
        );
        eprintln!("{}", "-".repeat(95));
    }

    fn log_line(&mut self, depth: usize, minute: u32, closed: u32, stats: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        eprintln!(
            "{:<9} | {:<12} | {:<6} | {:<8} | {:<6} | {:<10} | {:<12} | {:<12}",
            elapsed,
            stats.nodes_explored,
            depth,
            minute,
            closed,
            self.best_total,
            stats.prunings_late,
            stats.prunings_bound
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl SearchMonitor for LogMonitor {
    fn on_enter_search(&mut self, config: &SearchConfig, flowing: usize) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_total = 0;
        self.flowing = flowing;
        eprintln!(
            "searching from {} with {} minutes, {} valves worth opening",
            config.origin, config.budget, flowing
        );
        self.print_header();
    }

    fn on_descend(&mut self, state: &SearchState, stats: &SearchStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state.depth(), state.minute(), state.remaining(), stats);
        }
    }

    fn on_improvement(&mut self, best: &BestResult, stats: &SearchStatistics) {
        self.best_total = best.total();
        let minute = best.schedule().last().map_or(0, |a| a.minute);
        let closed = self.closed_after(best);
        self.log_line(best.schedule().len(), minute, closed, stats);
    }

    fn on_exit_search(&mut self, best: &BestResult, stats: &SearchStatistics) {
        eprintln!("{}", "-".repeat(95));
        eprintln!(
            "Search finished: best {} after {} nodes.",
            best.total(),
            stats.nodes_explored
        );
    }

    fn name(&self) -> &str {
        "LogMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::ValveId;
    use crate::scenario::sample::SampleNetwork;
    use crate::scenario::scenario::Scenario;
    use crate::search::engine::solve;
    use crate::search::state::{Activation, ActivationLog};

    #[test]
    fn test_log_monitor_tracks_best() {
        let mut monitor = LogMonitor::default();
        let stats = SearchStatistics::default();
        monitor.on_enter_search(&SearchConfig::default(), 6);

        let mut best = BestResult::default();
        let log = ActivationLog::from(vec![
            Activation::new(ValveId(3), 2),
            Activation::new(ValveId(1), 5),
        ]);
        assert!(best.offer(1000, &log));
        monitor.on_improvement(&best, &stats);

        assert_eq!(1000, monitor.best_total);
        assert_eq!(4, monitor.closed_after(&best));

        monitor.on_exit_search(&best, &stats);
        assert_eq!(1000, monitor.best_total);
    }

    #[test]
    fn test_log_monitor_resets_on_enter() {
        let mut monitor = LogMonitor::default();
        let mut best = BestResult::default();
        best.offer(50, &ActivationLog::from(vec![Activation::new(ValveId(0), 1)]));
        monitor.on_enter_search(&SearchConfig::default(), 2);
        monitor.on_improvement(&best, &SearchStatistics::default());

        monitor.on_enter_search(&SearchConfig::default(), 0);

        assert_eq!(0, monitor.best_total);
        assert_eq!(0, monitor.closed_after(&best));
    }

    #[test]
    fn test_log_monitor_during_search() {
        let graph = SampleNetwork.build();
        let mut monitor = LogMonitor::new(Duration::ZERO, 0);
        let outcome = solve(&graph, SearchConfig::default(), &mut monitor).unwrap();

        assert_eq!(1651, outcome.best.total());
        assert_eq!(1651, monitor.best_total);
        assert_eq!(6, monitor.flowing);
        assert_eq!(0, monitor.closed_after(&outcome.best));
    }
}
