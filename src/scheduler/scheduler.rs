use super::{fifo, mlfq, policy::SchedulingPolicy, round_robin, sjf, stcf};
use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::process::{validate_processes, Process};
use crate::timeline::Timeline;
use log::debug;

/// Validated entry point to the five policies.
///
/// Quanta are checked once in [`Scheduler::new`]; every call to
/// [`Scheduler::schedule`] checks its process batch before simulating, so a
/// bad batch never yields a partial timeline. The caller's process list is
/// only borrowed; each run works on its own copy.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, ScheduleError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one policy over `processes`
    pub fn schedule(
        &self,
        policy: SchedulingPolicy,
        processes: &[Process],
    ) -> Result<Timeline, ScheduleError> {
        validate_processes(processes)?;
        debug!(
            "Scheduling {} processes with {}",
            processes.len(),
            policy.display_name()
        );

        let timeline = match policy {
            SchedulingPolicy::Fifo => fifo::schedule(processes),
            SchedulingPolicy::Sjf => sjf::schedule(processes),
            SchedulingPolicy::Stcf => stcf::schedule(processes),
            SchedulingPolicy::RoundRobin => {
                round_robin::schedule(processes, self.config.time_quantum)
            }
            SchedulingPolicy::Mlfq => {
                mlfq::schedule(processes, self.config.q1_quantum, self.config.q2_quantum)
            }
        };

        debug!(
            "{} produced {} intervals, makespan {}",
            policy,
            timeline.len(),
            timeline.makespan()
        );
        Ok(timeline)
    }

    pub fn fifo(&self, processes: &[Process]) -> Result<Timeline, ScheduleError> {
        self.schedule(SchedulingPolicy::Fifo, processes)
    }

    pub fn sjf(&self, processes: &[Process]) -> Result<Timeline, ScheduleError> {
        self.schedule(SchedulingPolicy::Sjf, processes)
    }

    pub fn stcf(&self, processes: &[Process]) -> Result<Timeline, ScheduleError> {
        self.schedule(SchedulingPolicy::Stcf, processes)
    }

    pub fn round_robin(&self, processes: &[Process]) -> Result<Timeline, ScheduleError> {
        self.schedule(SchedulingPolicy::RoundRobin, processes)
    }

    pub fn mlfq(&self, processes: &[Process]) -> Result<Timeline, ScheduleError> {
        self.schedule(SchedulingPolicy::Mlfq, processes)
    }
}

/// Run one policy with an ad-hoc configuration
pub fn schedule(
    policy: SchedulingPolicy,
    processes: &[Process],
    config: &SchedulerConfig,
) -> Result<Timeline, ScheduleError> {
    Scheduler::new(config.clone())?.schedule(policy, processes)
}
