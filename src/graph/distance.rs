use crate::error::{Result, ValveError};
use crate::graph::graph::Graph;
use crate::graph::node::ValveId;
use std::collections::VecDeque;

const UNREACHED: u32 = u32::MAX;

/// Shortest hop counts between every ordered pair of valves.
pub struct DistanceTable {
    size: usize,
    /// row-major, `hops[from * size + to]`
    hops: Vec<u32>,
}

impl DistanceTable {
    /// Runs a breadth-first search from every valve. Tunnels all take one
    /// minute, so BFS layers are exact distances.
    pub fn measure(graph: &Graph) -> Result<Self> {
        let size = graph.valve_count();
        let mut hops = vec![UNREACHED; size * size];

        for source in graph.valves() {
            let row = &mut hops[source.id().index() * size..][..size];
            breadth_first(graph, source.id(), row);
        }

        if let Some(i) = hops.iter().position(|d| *d == UNREACHED) {
            return Err(ValveError::Unreachable {
                from: graph.name(ValveId(i / size)).to_string(),
                to: graph.name(ValveId(i % size)).to_string(),
            });
        }

        Ok(Self { size, hops })
    }

    pub fn get(&self, from: ValveId, to: ValveId) -> u32 {
        self.hops[from.index() * self.size + to.index()]
    }

    pub fn row(&self, from: ValveId) -> &[u32] {
        &self.hops[from.index() * self.size..][..self.size]
    }

    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.size
    }
}

fn breadth_first(graph: &Graph, source: ValveId, row: &mut [u32]) {
    let mut queue = VecDeque::new();
    row[source.index()] = 0;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = row[current.index()] + 1;
        for t in graph.tunnels(current) {
            if row[t.index()] == UNREACHED {
                row[t.index()] = next;
                queue.push_back(*t);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::loader::GraphLoader;
    use crate::scenario::random::RandomNetwork;
    use crate::scenario::scenario::Scenario;
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    const SAMPLE: &str = include_str!("../../fixtures/sample.txt");

    /// Independent single-source shortest paths with a min-heap.
    fn dijkstra(graph: &Graph, source: ValveId) -> Vec<u32> {
        let mut dist = vec![UNREACHED; graph.valve_count()];
        let mut settled = vec![false; graph.valve_count()];
        let mut heap = BinaryHeap::new();
        dist[source.index()] = 0;
        heap.push(Reverse((0u32, source.index())));

        while let Some(Reverse((d, v))) = heap.pop() {
            if settled[v] {
                continue;
            }
            settled[v] = true;
            for t in graph.tunnels(ValveId(v)) {
                let candidate = d + 1;
                if candidate < dist[t.index()] {
                    dist[t.index()] = candidate;
                    heap.push(Reverse((candidate, t.index())));
                }
            }
        }
        dist
    }

    fn assert_matches_dijkstra(graph: &Graph, table: &DistanceTable) {
        for valve in graph.valves() {
            assert_eq!(
                dijkstra(graph, valve.id()).as_slice(),
                table.row(valve.id()),
                "from {}",
                valve.name()
            );
        }
    }

    fn assert_metric(graph: &Graph, table: &DistanceTable) {
        let ids = graph.valves().iter().map(|v| v.id()).collect::<Vec<ValveId>>();
        for a in &ids {
            assert_eq!(0, table.get(*a, *a));
            for b in &ids {
                assert_eq!(table.get(*a, *b), table.get(*b, *a));
                for c in &ids {
                    assert!(table.get(*a, *c) <= table.get(*a, *b) + table.get(*b, *c));
                }
            }
        }
    }

    #[test]
    fn test_sample_distances() {
        let graph = GraphLoader::new().from_str(SAMPLE).unwrap();
        let table = DistanceTable::measure(&graph).unwrap();
        let id = |name: &str| graph.require(name).unwrap();

        assert_eq!(10, table.size());
        assert_eq!(5, table.get(id("AA"), id("HH")));
        assert_eq!(5, table.get(id("HH"), id("AA")));
        assert_eq!(1, table.get(id("AA"), id("DD")));
        assert_eq!(2, table.get(id("AA"), id("CC")));
        assert_eq!(0, table.get(id("AA"), id("AA")));
        assert_eq!(0, table.get(id("BB"), id("BB")));
        assert_eq!(6, table.get(id("BB"), id("HH")));
    }

    #[test]
    fn test_sample_is_metric_and_matches_dijkstra() {
        let graph = GraphLoader::new().from_str(SAMPLE).unwrap();
        let table = DistanceTable::measure(&graph).unwrap();

        assert_metric(&graph, &table);
        assert_matches_dijkstra(&graph, &table);
    }

    #[test]
    fn test_random_networks_match_dijkstra() {
        for seed in 0..8 {
            let graph = RandomNetwork::new(seed, 40, 10).build();
            let table = DistanceTable::measure(&graph).unwrap();

            assert_metric(&graph, &table);
            assert_matches_dijkstra(&graph, &table);
        }
    }

    #[test]
    fn test_disconnected_network_is_integrity_error() {
        let text = "Valve AA has flow rate=0; tunnel leads to valve BB\n\
                    Valve BB has flow rate=1; tunnel leads to valve AA\n\
                    Valve CC has flow rate=2; tunnels lead to valves\n";
        let graph = GraphLoader::new().from_str(text).unwrap();
        let err = DistanceTable::measure(&graph).err().unwrap();

        assert_eq!(ErrorKind::DataIntegrity, err.kind());
        match err {
            ValveError::Unreachable { from, to } => {
                assert_eq!("AA", from);
                assert_eq!("CC", to);
            }
            other => panic!("expected unreachable, got {:?}", other),
        }
    }
}
