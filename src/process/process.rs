use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type Ticks = u64;

/// A synthetic process as supplied by the caller.
///
/// Immutable once a run starts: policies borrow the caller's list and build
/// their own [`ProcessState`](super::ProcessState) copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    /// Unique process ID within a run
    pub id: String,

    /// Earliest tick at which the process may be dispatched
    #[serde(alias = "arrivalTime")]
    pub arrival_time: Ticks,

    /// Total CPU time required
    #[serde(alias = "burstTime")]
    pub burst_time: Ticks,
}

impl Process {
    pub fn new(id: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
        }
    }

    /// Check the invariants of a single process
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.id.trim().is_empty() {
            return Err(ScheduleError::invalid_process(
                &self.id,
                "process id must not be empty",
            ));
        }
        if self.burst_time == 0 {
            return Err(ScheduleError::invalid_process(
                &self.id,
                "burst time must be positive",
            ));
        }
        Ok(())
    }
}

/// Validate a whole batch: every process individually, id uniqueness, and a
/// time span (latest arrival plus total burst) that fits in [`Ticks`].
pub fn validate_processes(processes: &[Process]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::with_capacity(processes.len());
    let mut total_burst: Ticks = 0;
    let mut max_arrival: Ticks = 0;
    for process in processes {
        process.validate()?;
        if !seen.insert(process.id.as_str()) {
            return Err(ScheduleError::invalid_process(
                &process.id,
                "duplicate process id",
            ));
        }
        max_arrival = max_arrival.max(process.arrival_time);
        let burst = total_burst
            .checked_add(process.burst_time)
            .filter(|total| total.checked_add(max_arrival).is_some());
        total_burst = burst.ok_or_else(|| {
            ScheduleError::invalid_process(&process.id, "batch time span overflows the clock")
        })?;
    }
    Ok(())
}

/// Indices of `processes` ordered by arrival time; ties keep input order.
pub fn arrival_order(processes: &[Process]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    // sort_by_key is stable
    order.sort_by_key(|&idx| processes[idx].arrival_time);
    order
}
