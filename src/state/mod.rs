pub mod snapshot;
pub mod valve_state;
