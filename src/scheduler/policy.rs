use crate::error::ScheduleError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy selecting which simulation produces the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchedulingPolicy {
    /// First-In-First-Out: run to completion in arrival order
    Fifo,
    /// Shortest Job First: non-preemptive, shortest burst among arrived processes
    Sjf,
    /// Shortest Time-to-Completion First: preemptive SJF
    Stcf,
    /// Round Robin with a fixed time quantum
    RoundRobin,
    /// Multi-Level Feedback Queue with three levels
    Mlfq,
}

impl SchedulingPolicy {
    /// Every policy, in canonical order
    pub const ALL: [SchedulingPolicy; 5] = [
        SchedulingPolicy::Fifo,
        SchedulingPolicy::Sjf,
        SchedulingPolicy::Stcf,
        SchedulingPolicy::RoundRobin,
        SchedulingPolicy::Mlfq,
    ];

    /// Short machine-friendly name
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingPolicy::Fifo => "fifo",
            SchedulingPolicy::Sjf => "sjf",
            SchedulingPolicy::Stcf => "stcf",
            SchedulingPolicy::RoundRobin => "rr",
            SchedulingPolicy::Mlfq => "mlfq",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            SchedulingPolicy::Fifo => "First-In-First-Out",
            SchedulingPolicy::Sjf => "Shortest Job First",
            SchedulingPolicy::Stcf => "Shortest Time-to-Completion First",
            SchedulingPolicy::RoundRobin => "Round Robin",
            SchedulingPolicy::Mlfq => "Multi-Level Feedback Queue",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        !matches!(self, SchedulingPolicy::Fifo | SchedulingPolicy::Sjf)
    }

    /// Parse a policy selection: `"all"` or a comma-separated list of names.
    /// Duplicates are dropped; canonical order is preserved.
    pub fn parse_selection(s: &str) -> Result<Vec<Self>, ScheduleError> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::ALL.to_vec());
        }

        let mut policies = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Self::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if policies.is_empty() {
            return Err(ScheduleError::UnknownPolicy(s.to_string()));
        }
        policies.sort();
        policies.dedup();
        Ok(policies)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fifo" | "fcfs" => Ok(SchedulingPolicy::Fifo),
            "sjf" => Ok(SchedulingPolicy::Sjf),
            "stcf" | "srtf" | "psjf" => Ok(SchedulingPolicy::Stcf),
            "rr" | "round_robin" | "round-robin" => Ok(SchedulingPolicy::RoundRobin),
            "mlfq" => Ok(SchedulingPolicy::Mlfq),
            _ => Err(ScheduleError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
