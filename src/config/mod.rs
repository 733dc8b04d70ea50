pub mod scheduler;
pub mod simulation;
pub mod workload;

pub use scheduler::SchedulerConfig;
pub use simulation::SimulationConfig;
pub use workload::{BurstDistribution, WorkloadConfig};

use crate::process::{generate_processes, validate_processes, Process};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration that aggregates all sub-configs.
///
/// The process set comes either from an explicit `[[processes]]` list or from
/// a `[workload]` generator section, never both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub workload: Option<WorkloadConfig>,
    #[serde(default)]
    pub processes: Vec<Process>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.scheduler.validate()?;
        self.scheduler.policies()?;
        if let Some(workload) = &self.workload {
            if !self.processes.is_empty() {
                return Err("configure either [[processes]] or [workload], not both".into());
            }
            workload.validate()?;
        }
        validate_processes(&self.processes)?;
        Ok(())
    }

    /// The process set this configuration describes
    pub fn resolve_processes(&self) -> Result<Vec<Process>, String> {
        match &self.workload {
            Some(workload) => generate_processes(workload),
            None => Ok(self.processes.clone()),
        }
    }

    /// Get a default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Config {
            scheduler: SchedulerConfig::default(),
            simulation: SimulationConfig::default(),
            workload: None,
            processes: vec![
                Process::new("P1", 0, 10),
                Process::new("P2", 2, 5),
                Process::new("P3", 4, 8),
            ],
        }
    }
}
