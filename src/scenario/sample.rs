use crate::graph::graph::Graph;
use crate::graph::node::{Valve, ValveId};
use crate::scenario::scenario::Scenario;

/// The ten valve network whose best 30 minute plan releases 1651.
pub struct SampleNetwork;

impl Scenario for SampleNetwork {
    fn build(&self) -> Graph {
        let ids = |list: &[usize]| list.iter().map(|i| ValveId(*i)).collect::<Vec<ValveId>>();
        let valves = vec![
            Valve::new(ValveId(0), "AA", 0, ids(&[3, 8, 1])),
            Valve::new(ValveId(1), "BB", 13, ids(&[2, 0])),
            Valve::new(ValveId(2), "CC", 2, ids(&[3, 1])),
            Valve::new(ValveId(3), "DD", 20, ids(&[2, 0, 4])),
            Valve::new(ValveId(4), "EE", 3, ids(&[5, 3])),
            Valve::new(ValveId(5), "FF", 0, ids(&[4, 6])),
            Valve::new(ValveId(6), "GG", 0, ids(&[5, 7])),
            Valve::new(ValveId(7), "HH", 22, ids(&[6])),
            Valve::new(ValveId(8), "II", 0, ids(&[0, 9])),
            Valve::new(ValveId(9), "JJ", 21, ids(&[8])),
        ];

        Graph::new(valves)
    }
}
