use crate::graph::graph::Graph;

pub trait Scenario {
    fn build(&self) -> Graph;
}
