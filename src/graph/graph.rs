use crate::error::{Result, ValveError};
use crate::graph::node::{Valve, ValveId};
use std::collections::HashMap;
use std::fmt;

pub struct Graph {
    valves: Vec<Valve>,
    by_name: HashMap<String, ValveId>,
}

impl Graph {
    /// Builds a graph from valves whose ids are their positions in `valves`.
    pub fn new(valves: Vec<Valve>) -> Self {
        debug_assert!(valves.iter().enumerate().all(|(i, v)| v.id().index() == i));
        let by_name = valves
            .iter()
            .map(|v| (v.name().to_string(), v.id()))
            .collect();
        Self { valves, by_name }
    }

    pub fn valves(&self) -> &[Valve] {
        &self.valves
    }

    pub fn valve_by_id(&self, id: ValveId) -> &Valve {
        &self.valves[id.index()]
    }

    pub fn tunnels(&self, id: ValveId) -> &[ValveId] {
        self.valves[id.index()].tunnels()
    }

    pub fn valve_count(&self) -> usize {
        self.valves.len()
    }

    pub fn find(&self, name: &str) -> Option<ValveId> {
        self.by_name.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<ValveId> {
        self.find(name)
            .ok_or_else(|| ValveError::UnknownValve(name.to_string()))
    }

    pub fn name(&self, id: ValveId) -> &str {
        self.valves[id.index()].name()
    }

    pub fn rate(&self, id: ValveId) -> u32 {
        self.valves[id.index()].rate()
    }

    /// Valves worth opening, in id order.
    pub fn flowing(&self) -> Vec<ValveId> {
        self.valves
            .iter()
            .filter(|v| v.rate() > 0)
            .map(|v| v.id())
            .collect()
    }

    pub fn total_rate(&self) -> u64 {
        self.valves.iter().map(|v| v.rate() as u64).sum()
    }

    /// Every tunnel must be listed at both of its ends.
    pub fn verify_symmetric(&self) -> Result<()> {
        self.valves
            .iter()
            .flat_map(|v| v.tunnels().iter().map(move |t| (v.id(), *t)))
            .find(|(from, to)| !self.tunnels(*to).contains(from))
            .map_or(Ok(()), |(from, to)| {
                Err(ValveError::AsymmetricTunnel {
                    from: self.name(from).to_string(),
                    to: self.name(to).to_string(),
                })
            })
    }
}

/// Renders the graph back into the line format accepted by the loader.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for valve in &self.valves {
            let names = valve
                .tunnels()
                .iter()
                .map(|t| self.name(*t))
                .collect::<Vec<&str>>();
            let lead = if names.len() == 1 {
                "tunnel leads to valve"
            } else {
                "tunnels lead to valves"
            };
            write!(
                f,
                "Valve {} has flow rate={}; {}",
                valve.name(),
                valve.rate(),
                lead
            )?;
            if !names.is_empty() {
                write!(f, " {}", names.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
