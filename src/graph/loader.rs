use crate::error::{Result, ValveError};
use crate::graph::graph::Graph;
use crate::graph::node::{Valve, ValveId};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

struct RawValve<'a> {
    name: &'a str,
    rate: u32,
    tunnels: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphLoader;

impl GraphLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Graph> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    pub fn from_bufread<R: BufRead>(&self, reader: R) -> Result<Graph> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        self.from_lines(lines.iter().map(String::as_str))
    }

    #[cfg(test)]
    pub fn from_str(&self, text: &str) -> Result<Graph> {
        self.from_lines(text.lines())
    }

    fn from_lines<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Result<Graph> {
        let mut raw = Vec::new();
        for (i, line) in lines.enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let valve = parse_line(line).ok_or_else(|| ValveError::Parse {
                line: i + 1,
                content: line.to_string(),
            })?;
            raw.push(valve);
        }

        let mut ids: HashMap<&str, ValveId> = HashMap::with_capacity(raw.len());
        for (i, valve) in raw.iter().enumerate() {
            if ids.insert(valve.name, ValveId(i)).is_some() {
                return Err(ValveError::DuplicateValve(valve.name.to_string()));
            }
        }

        let valves = raw
            .iter()
            .enumerate()
            .map(|(i, valve)| {
                let tunnels = valve
                    .tunnels
                    .iter()
                    .map(|t| {
                        ids.get(t)
                            .copied()
                            .ok_or_else(|| ValveError::UnknownValve(t.to_string()))
                    })
                    .collect::<Result<Vec<ValveId>>>()?;
                Ok(Valve::new(ValveId(i), valve.name, valve.rate, tunnels))
            })
            .collect::<Result<Vec<Valve>>>()?;

        let graph = Graph::new(valves);
        graph.verify_symmetric()?;
        Ok(graph)
    }
}

fn is_valve_name(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Strips `word` and an optional plural `s`.
fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    Some(rest.strip_prefix('s').unwrap_or(rest))
}

fn parse_line(line: &str) -> Option<RawValve<'_>> {
    let rest = line.strip_prefix("Valve ")?;
    let (name, rest) = rest.split_once(" has flow rate=")?;
    if !is_valve_name(name) {
        return None;
    }
    let (rate, rest) = rest.split_once(';')?;
    let rate = rate.parse::<u32>().ok()?;

    let rest = rest.strip_prefix(' ')?;
    let rest = strip_word(rest, "tunnel")?.strip_prefix(' ')?;
    let rest = strip_word(rest, "lead")?.strip_prefix(' ')?;
    let rest = rest.strip_prefix("to ")?;
    let rest = strip_word(rest, "valve")?;
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }

    let list = rest.trim();
    let tunnels = if list.is_empty() {
        Vec::new()
    } else {
        list.split(',').map(str::trim).collect::<Vec<&str>>()
    };
    if !tunnels.iter().all(|t| is_valve_name(t)) {
        return None;
    }

    Some(RawValve {
        name,
        rate,
        tunnels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: &str = include_str!("../../fixtures/sample.txt");

    #[test]
    fn test_load_sample() {
        let graph = GraphLoader::new().from_str(SAMPLE).unwrap();

        assert_eq!(10, graph.valve_count());
        let aa = graph.require("AA").unwrap();
        let names = graph
            .tunnels(aa)
            .iter()
            .map(|t| graph.name(*t))
            .collect::<Vec<&str>>();
        assert_eq!(vec!["DD", "II", "BB"], names);
        assert_eq!(22, graph.rate(graph.require("HH").unwrap()));
        assert_eq!(6, graph.flowing().len());
    }

    #[test]
    fn test_loaded_adjacency_is_symmetric() {
        let graph = GraphLoader::new().from_str(SAMPLE).unwrap();

        for valve in graph.valves() {
            for t in valve.tunnels() {
                assert!(graph.tunnels(*t).contains(&valve.id()));
            }
        }
    }

    #[test]
    fn test_singular_and_plural_forms() {
        let text = "Valve AA has flow rate=0; tunnel leads to valves BB\n\
                    Valve BB has flow rate=7; tunnels lead to valve AA\n";
        let graph = GraphLoader::new().from_str(text).unwrap();

        assert_eq!(2, graph.valve_count());
        assert_eq!(7, graph.rate(ValveId(1)));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = "\nValve AA has flow rate=1; tunnels lead to valves\n\n";
        let graph = GraphLoader::new().from_str(text).unwrap();

        assert_eq!(1, graph.valve_count());
        assert!(graph.tunnels(ValveId(0)).is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "Valve AA has flow rate=0; tunnels lead to valves BB\n\
                    Valve BB has flow rate=x; tunnels lead to valves AA\n";
        let err = GraphLoader::new().from_str(text).err().unwrap();

        assert_eq!(ErrorKind::Parse, err.kind());
        match err {
            ValveError::Parse { line, content } => {
                assert_eq!(2, line);
                assert!(content.starts_with("Valve BB"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_lines() {
        for line in [
            "Valve AA flow rate=0; tunnels lead to valves BB",
            "Valve AA has flow rate=-3; tunnels lead to valves BB",
            "Valve AA has flow rate=0; tunnels lead to valvesBB",
            "Valve AA has flow rate=0; tunnels lead to valves BB,, CC",
            "Valve A-A has flow rate=0; tunnels lead to valves BB",
            "Valve AA has flow rate=0;tunnels lead to valves BB",
            "Valve AA has flow rate=0;  tunnels lead to valves BB",
            "Valve AA has flow rate=0; tunnelslead to valves BB",
            "Valve AA has flow rate=0; tunnels leadto valves BB",
            "Valve AA has flow rate=0; tunnels lead tovalves BB",
            "Valve AA has flow rate=0; tunnels lead  to valves BB",
        ] {
            let err = GraphLoader::new().from_str(line).err().unwrap();
            assert_eq!(ErrorKind::Parse, err.kind(), "{}", line);
        }
    }

    #[test]
    fn test_unknown_tunnel_target() {
        let text = "Valve AA has flow rate=0; tunnel leads to valve ZZ";
        let err = GraphLoader::new().from_str(text).err().unwrap();

        assert_eq!(ErrorKind::DataIntegrity, err.kind());
        assert!(matches!(err, ValveError::UnknownValve(name) if name == "ZZ"));
    }

    #[test]
    fn test_duplicate_valve() {
        let text = "Valve AA has flow rate=0; tunnel leads to valve BB\n\
                    Valve BB has flow rate=1; tunnel leads to valve AA\n\
                    Valve AA has flow rate=2; tunnel leads to valve BB\n";
        let err = GraphLoader::new().from_str(text).err().unwrap();

        assert!(matches!(err, ValveError::DuplicateValve(name) if name == "AA"));
    }

    #[test]
    fn test_one_way_tunnel_is_integrity_error() {
        let text = "Valve AA has flow rate=0; tunnels lead to valves BB, CC\n\
                    Valve BB has flow rate=1; tunnel leads to valve AA\n\
                    Valve CC has flow rate=2; tunnel leads to valve BB\n";
        let err = GraphLoader::new().from_str(text).err().unwrap();

        assert_eq!(ErrorKind::DataIntegrity, err.kind());
        assert!(matches!(err, ValveError::AsymmetricTunnel { .. }));
    }

    #[test]
    fn test_display_is_accepted_by_loader() {
        let graph = GraphLoader::new().from_str(SAMPLE).unwrap();
        let reloaded = GraphLoader::new().from_str(&graph.to_string()).unwrap();

        assert_eq!(graph.valve_count(), reloaded.valve_count());
        for valve in graph.valves() {
            let other = reloaded.valve_by_id(valve.id());
            assert_eq!(valve.name(), other.name());
            assert_eq!(valve.rate(), other.rate());
            assert_eq!(valve.tunnels(), other.tunnels());
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GraphLoader::new()
            .from_path("fixtures/does-not-exist.txt")
            .err()
            .unwrap();

        assert_eq!(ErrorKind::Io, err.kind());
    }
}
