use crate::graph::graph::Graph;
use crate::graph::node::{Valve, ValveId};
use crate::scenario::scenario::Scenario;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Two-letter names give 26 * 26 distinct valves.
const MAX_VALVES: usize = 26 * 26;
const MAX_RATE: u32 = 25;

/// Seeded generator for connected networks with symmetric tunnels.
///
/// Valve 0 is always `AA` with rate zero, so the usual origin exists and is
/// never itself worth opening.
pub struct RandomNetwork {
    seed: u64,
    valves: usize,
    flowing: usize,
}

impl RandomNetwork {
    pub fn new(seed: u64, valves: usize, flowing: usize) -> Self {
        let valves = valves.clamp(1, MAX_VALVES);
        Self {
            seed,
            valves,
            flowing: flowing.min(valves - 1),
        }
    }
}

fn valve_name(index: usize) -> String {
    let hi = (b'A' + (index / 26) as u8) as char;
    let lo = (b'A' + (index % 26) as u8) as char;
    format!("{}{}", hi, lo)
}

impl Scenario for RandomNetwork {
    fn build(&self) -> Graph {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.valves;

        let mut rates = vec![0u32; n];
        let mut candidates = (1..n).collect::<Vec<usize>>();
        candidates.shuffle(&mut rng);
        for i in candidates.into_iter().take(self.flowing) {
            rates[i] = rng.gen_range(1..=MAX_RATE);
        }

        let mut adj: Vec<Vec<ValveId>> = vec![Vec::new(); n];
        let mut has_tunnel = vec![vec![false; n]; n];

        let mut add_tunnel = |a: usize, b: usize| {
            if a == b || has_tunnel[a][b] {
                return;
            }
            has_tunnel[a][b] = true;
            has_tunnel[b][a] = true;
            adj[a].push(ValveId(b));
            adj[b].push(ValveId(a));
        };

        // spanning tree keeps everything reachable
        for i in 1..n {
            let parent = rng.gen_range(0..i);
            add_tunnel(i, parent);
        }

        let extra_tunnels = n / 2;
        for _ in 0..extra_tunnels {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            add_tunnel(a, b);
        }

        let valves = adj
            .into_iter()
            .enumerate()
            .map(|(i, tunnels)| Valve::new(ValveId(i), valve_name(i), rates[i], tunnels))
            .collect();

        Graph::new(valves)
    }
}
