mod simulation;
mod state;

pub use simulation::Simulation;
pub use state::{next_event, EngineState, EventKind, Phase};
