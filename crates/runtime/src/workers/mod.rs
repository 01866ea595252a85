//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the authoritative game state and is the only
//! task that mutates it.

mod simulation;

pub use simulation::{Command, SimulationWorker};
