pub mod replay;
pub mod scenario;

pub use replay::{Replay, TickOutput};
pub use scenario::{Scenario, Tick, TouchEvent};
