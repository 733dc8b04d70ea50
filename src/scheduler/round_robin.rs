use super::arrivals::ArrivalQueue;
use crate::process::{runtime_states, Process, Ticks};
use crate::timeline::Timeline;
use log::trace;
use std::collections::VecDeque;

/// Round robin with a fixed time quantum.
///
/// Processes that arrive during a slice, or exactly at its end, join the
/// tail of the ready queue ahead of the process that was just preempted.
pub(crate) fn schedule(processes: &[Process], time_quantum: Ticks) -> Timeline {
    debug_assert!(time_quantum > 0);

    let mut states = runtime_states(processes);
    let mut arrivals = ArrivalQueue::new(processes);
    let mut ready: VecDeque<usize> = VecDeque::with_capacity(processes.len());
    let mut timeline = Timeline::with_capacity(processes.len());
    let mut clock: Ticks = 0;

    loop {
        while let Some(idx) = arrivals.pop_arrived(clock) {
            states[idx].admit();
            ready.push_back(idx);
        }

        let Some(idx) = ready.pop_front() else {
            match arrivals.peek_time() {
                Some(next_arrival) => {
                    clock = next_arrival;
                    continue;
                }
                None => break,
            }
        };

        let state = &mut states[idx];
        state.dispatch();
        let slice = state.run_for(time_quantum);
        trace!("rr: {} runs {}..{}", state.id(), clock, clock + slice);
        timeline.push(state.id(), clock, clock + slice);
        clock += slice;

        while let Some(arrived) = arrivals.pop_arrived(clock) {
            states[arrived].admit();
            ready.push_back(arrived);
        }

        if !states[idx].is_finished() {
            states[idx].mark_preempted();
            ready.push_back(idx);
        }
    }

    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::ExecutionInterval;

    #[test]
    fn test_rr_reference_workload() {
        let processes = vec![
            Process::new("P1", 0, 10),
            Process::new("P2", 2, 5),
            Process::new("P3", 4, 8),
        ];
        assert_eq!(
            schedule(&processes, 4).intervals(),
            &[
                ExecutionInterval::new("P1", 0, 4),
                ExecutionInterval::new("P2", 4, 8),
                ExecutionInterval::new("P3", 8, 12),
                ExecutionInterval::new("P1", 12, 16),
                ExecutionInterval::new("P2", 16, 17),
                ExecutionInterval::new("P3", 17, 21),
                ExecutionInterval::new("P1", 21, 23),
            ]
        );
    }

    #[test]
    fn test_rr_arrival_at_slice_end_goes_first() {
        // P2 arrives exactly when P1's first slice ends and is queued ahead of P1
        let processes = vec![Process::new("P1", 0, 4), Process::new("P2", 2, 2)];
        assert_eq!(
            schedule(&processes, 2).intervals(),
            &[
                ExecutionInterval::new("P1", 0, 2),
                ExecutionInterval::new("P2", 2, 4),
                ExecutionInterval::new("P1", 4, 6),
            ]
        );
    }

    #[test]
    fn test_rr_single_process_back_to_back_slices() {
        let processes = vec![Process::new("P1", 0, 5)];
        assert_eq!(
            schedule(&processes, 2).intervals(),
            &[
                ExecutionInterval::new("P1", 0, 2),
                ExecutionInterval::new("P1", 2, 4),
                ExecutionInterval::new("P1", 4, 5),
            ]
        );
    }

    #[test]
    fn test_rr_idle_skip() {
        let processes = vec![Process::new("P1", 0, 1), Process::new("P2", 6, 3)];
        assert_eq!(
            schedule(&processes, 4).intervals(),
            &[
                ExecutionInterval::new("P1", 0, 1),
                ExecutionInterval::new("P2", 6, 9),
            ]
        );
    }

    #[test]
    fn test_rr_large_quantum_matches_fifo() {
        let processes = vec![
            Process::new("P1", 0, 10),
            Process::new("P2", 2, 5),
            Process::new("P3", 4, 8),
        ];
        assert_eq!(schedule(&processes, 100), crate::scheduler::fifo::schedule(&processes));
    }
}
