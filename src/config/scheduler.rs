use crate::error::ScheduleError;
use crate::scheduler::SchedulingPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Policy selection: "all", one policy name, or a comma-separated list
    pub policy: String,

    /// Round robin time quantum
    pub time_quantum: u64,

    /// MLFQ level-0 quantum
    pub q1_quantum: u64,

    /// MLFQ level-1 quantum (level 2 runs to completion)
    pub q2_quantum: u64,
}

pub const DEFAULT_TIME_QUANTUM: u64 = 4;
pub const DEFAULT_Q1_QUANTUM: u64 = 4;
pub const DEFAULT_Q2_QUANTUM: u64 = 8;

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: "all".to_string(),
            time_quantum: DEFAULT_TIME_QUANTUM,
            q1_quantum: DEFAULT_Q1_QUANTUM,
            q2_quantum: DEFAULT_Q2_QUANTUM,
        }
    }
}

impl SchedulerConfig {
    /// Every quantum must be positive
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for (parameter, value) in [
            ("time_quantum", self.time_quantum),
            ("q1_quantum", self.q1_quantum),
            ("q2_quantum", self.q2_quantum),
        ] {
            if value == 0 {
                return Err(ScheduleError::InvalidConfiguration { parameter, value });
            }
        }
        Ok(())
    }

    /// Policies named by `policy`
    pub fn policies(&self) -> Result<Vec<SchedulingPolicy>, ScheduleError> {
        SchedulingPolicy::parse_selection(&self.policy)
    }
}
