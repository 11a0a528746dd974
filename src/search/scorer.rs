use crate::graph::graph::Graph;
use crate::search::state::ActivationLog;

/// Yield of a valve with `rate` that finishes opening at `minute`.
/// Valves finishing at or after the deadline release nothing.
pub fn gain(rate: u32, minute: u32, budget: u32) -> u64 {
    rate as u64 * budget.saturating_sub(minute) as u64
}

/// Total yield released by the deadline for every activation in `log`.
pub fn score(log: &ActivationLog, graph: &Graph, budget: u32) -> u64 {
    log.iter()
        .map(|a| gain(graph.rate(a.valve), a.minute, budget))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::Valve;
    use crate::scenario::random::RandomNetwork;
    use crate::scenario::sample::SampleNetwork;
    use crate::scenario::scenario::Scenario;
    use crate::search::state::Activation;

    fn log(graph: &Graph, plan: &[(&str, u32)]) -> ActivationLog {
        plan.iter()
            .map(|(name, minute)| Activation::new(graph.require(name).unwrap(), *minute))
            .collect::<Vec<Activation>>()
            .into()
    }

    #[test]
    fn test_best_sample_plan() {
        let graph = SampleNetwork.build();
        let plan = log(
            &graph,
            &[("DD", 2), ("BB", 5), ("JJ", 9), ("HH", 17), ("EE", 21), ("CC", 24)],
        );

        assert_eq!(1651, score(&plan, &graph, 30));
    }

    #[test]
    fn test_empty_log_scores_zero() {
        let graph = SampleNetwork.build();

        assert_eq!(0, score(&ActivationLog::new(), &graph, 30));
    }

    #[test]
    fn test_activation_at_or_after_deadline_releases_nothing() {
        let graph = SampleNetwork.build();

        assert_eq!(0, score(&log(&graph, &[("DD", 30)]), &graph, 30));
        assert_eq!(0, score(&log(&graph, &[("DD", 31)]), &graph, 30));
        assert_eq!(20, score(&log(&graph, &[("DD", 29)]), &graph, 30));
        assert_eq!(0, score(&log(&graph, &[("DD", 1)]), &graph, 0));
    }

    #[test]
    fn test_raising_a_rate_never_lowers_the_score() {
        let graph = RandomNetwork::new(11, 20, 8).build();
        let flowing = graph.flowing();
        let plan: ActivationLog = flowing
            .iter()
            .enumerate()
            .map(|(i, v)| Activation::new(*v, 3 * i as u32 + 2))
            .collect::<Vec<Activation>>()
            .into();
        let base = score(&plan, &graph, 30);

        for target in graph.valves().iter().map(|v| v.id()) {
            let boosted = Graph::new(
                graph
                    .valves()
                    .iter()
                    .map(|v| {
                        let bump = if v.id() == target { 7 } else { 0 };
                        Valve::new(v.id(), v.name(), v.rate() + bump, v.tunnels().to_vec())
                    })
                    .collect(),
            );

            assert!(score(&plan, &boosted, 30) >= base, "boosting {:?}", target);
        }
    }
}
