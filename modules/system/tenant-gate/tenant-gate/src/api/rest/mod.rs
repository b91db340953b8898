pub mod middleware;
pub mod responses;

pub use middleware::{GateState, access_gate_middleware};
