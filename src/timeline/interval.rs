use crate::process::Ticks;
use serde::{Deserialize, Serialize};

/// One contiguous stretch of CPU time given to a single process
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionInterval {
    pub process_id: String,
    pub start_time: Ticks,
    /// Exclusive; always greater than `start_time`
    pub end_time: Ticks,
}

impl ExecutionInterval {
    pub fn new(process_id: impl Into<String>, start_time: Ticks, end_time: Ticks) -> Self {
        Self {
            process_id: process_id.into(),
            start_time,
            end_time,
        }
    }

    pub fn duration(&self) -> Ticks {
        self.end_time - self.start_time
    }
}
