#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValveId(pub usize);

impl ValveId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct Valve {
    id: ValveId,
    name: String,
    /// flow released per minute once open
    rate: u32,
    tunnels: Vec<ValveId>,
}

impl Valve {
    pub fn new(id: ValveId, name: impl Into<String>, rate: u32, tunnels: Vec<ValveId>) -> Self {
        Self {
            id,
            name: name.into(),
            rate,
            tunnels,
        }
    }

    pub fn id(&self) -> ValveId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn tunnels(&self) -> &[ValveId] {
        &self.tunnels
    }
}
