/// Process status during a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Arrival time not reached yet (or not yet admitted to a ready queue)
    NotArrived,
    /// Admitted and waiting for the CPU
    Ready,
    /// Currently holding the CPU
    Running,
    /// All burst time consumed
    Completed,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessStatus::NotArrived => write!(f, "NotArrived"),
            ProcessStatus::Ready => write!(f, "Ready"),
            ProcessStatus::Running => write!(f, "Running"),
            ProcessStatus::Completed => write!(f, "Completed"),
        }
    }
}
