pub mod generator;
pub mod process;
pub mod state;
pub mod status;

pub use generator::{generate_processes, ProcessGenerator};
pub use process::{arrival_order, validate_processes, Process, Ticks};
pub use state::{runtime_states, ProcessState};
pub use status::ProcessStatus;
