pub mod simulator;

pub use simulator::{PolicyRun, SimulationError, SimulationReport, Simulator};
