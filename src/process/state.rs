use super::process::{Process, Ticks};
use super::status::ProcessStatus;

/// Per-run mutable copy of a [`Process`].
///
/// Policies build a fresh vector of these at the start of every invocation,
/// so the caller's list is never touched.
#[derive(Debug, Clone)]
pub struct ProcessState {
    /// Private copy of the input descriptor
    pub process: Process,

    /// CPU time still owed; terminal at 0
    pub remaining: Ticks,

    /// MLFQ queue level (0 = highest priority); never decreases
    pub queue_level: usize,

    /// Lifecycle status; `Completed` exactly when `remaining` reaches 0
    pub status: ProcessStatus,
}

impl ProcessState {
    pub fn new(process: &Process) -> Self {
        Self {
            process: process.clone(),
            remaining: process.burst_time,
            queue_level: 0,
            status: ProcessStatus::NotArrived,
        }
    }

    pub fn id(&self) -> &str {
        &self.process.id
    }

    pub fn arrival_time(&self) -> Ticks {
        self.process.arrival_time
    }

    pub fn is_finished(&self) -> bool {
        self.status == ProcessStatus::Completed
    }

    /// Process entered a ready queue
    pub fn admit(&mut self) {
        debug_assert_eq!(self.status, ProcessStatus::NotArrived);
        self.status = ProcessStatus::Ready;
    }

    pub fn dispatch(&mut self) {
        debug_assert_eq!(self.status, ProcessStatus::Ready, "dispatched {}", self.id());
        self.status = ProcessStatus::Running;
    }

    /// Consume up to `ticks` of CPU time and return how much was actually used
    pub fn run_for(&mut self, ticks: Ticks) -> Ticks {
        let used = ticks.min(self.remaining);
        self.remaining -= used;
        if self.remaining == 0 {
            self.status = ProcessStatus::Completed;
        }
        used
    }

    /// Running process lost the CPU with work remaining
    pub fn mark_preempted(&mut self) {
        debug_assert_eq!(self.status, ProcessStatus::Running);
        self.status = ProcessStatus::Ready;
    }

    /// Move one MLFQ level down, saturating at `lowest_level`
    pub fn demote(&mut self, lowest_level: usize) {
        self.queue_level = (self.queue_level + 1).min(lowest_level);
    }
}

/// Build the private runtime copy of a process list
pub fn runtime_states(processes: &[Process]) -> Vec<ProcessState> {
    processes.iter().map(ProcessState::new).collect()
}
