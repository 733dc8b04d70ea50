use crate::process::{arrival_order, Process, Ticks};

/// Processes that have not been admitted yet, in arrival order.
///
/// Shared by the policies that admit processes as the clock advances.
pub(crate) struct ArrivalQueue {
    // (arrival_time, process index), sorted stably by arrival
    pending: Vec<(Ticks, usize)>,
    next: usize,
}

impl ArrivalQueue {
    pub fn new(processes: &[Process]) -> Self {
        let pending = arrival_order(processes)
            .into_iter()
            .map(|idx| (processes[idx].arrival_time, idx))
            .collect();
        Self { pending, next: 0 }
    }

    /// Arrival time of the next process not yet admitted
    pub fn peek_time(&self) -> Option<Ticks> {
        self.pending.get(self.next).map(|&(arrival, _)| arrival)
    }

    /// Next process with `arrival_time <= clock`
    pub fn pop_arrived(&mut self, clock: Ticks) -> Option<usize> {
        self.pop_if(|arrival| arrival <= clock)
    }

    /// Next process with `arrival_time < clock`
    pub fn pop_arrived_before(&mut self, clock: Ticks) -> Option<usize> {
        self.pop_if(|arrival| arrival < clock)
    }

    fn pop_if(&mut self, arrived: impl Fn(Ticks) -> bool) -> Option<usize> {
        let &(arrival, idx) = self.pending.get(self.next)?;
        if arrived(arrival) {
            self.next += 1;
            Some(idx)
        } else {
            None
        }
    }
}
