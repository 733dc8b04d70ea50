use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Run the selected policies on scoped worker threads
    pub parallel: bool,

    /// Reject process sets whose horizon (latest arrival + total burst)
    /// exceeds this many ticks
    pub max_simulated_time: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            max_simulated_time: 1_000_000,
        }
    }
}
