use super::arrivals::ArrivalQueue;
use crate::process::{runtime_states, Process, ProcessState, Ticks};
use crate::timeline::Timeline;
use log::{debug, trace};
use std::collections::VecDeque;

/// Number of feedback levels; the last one runs processes to completion
pub const MLFQ_LEVELS: usize = 3;

/// Multi-level feedback queue with three strictly prioritized FIFO levels.
///
/// New processes enter level 0. A process that exhausts its level's quantum
/// is demoted one level; there is no promotion. Slices are never cut short:
/// an arrival during a slice joins level 0 right away but only competes at
/// the next dispatch decision.
pub(crate) fn schedule(processes: &[Process], q1_quantum: Ticks, q2_quantum: Ticks) -> Timeline {
    debug_assert!(q1_quantum > 0 && q2_quantum > 0);

    let quanta: [Option<Ticks>; MLFQ_LEVELS] = [Some(q1_quantum), Some(q2_quantum), None];
    let mut states = runtime_states(processes);
    let mut arrivals = ArrivalQueue::new(processes);
    let mut queues: [VecDeque<usize>; MLFQ_LEVELS] = Default::default();
    let mut timeline = Timeline::with_capacity(processes.len());
    let mut clock: Ticks = 0;

    loop {
        while let Some(idx) = arrivals.pop_arrived(clock) {
            enqueue_arrival(&mut states, &mut queues, idx);
        }

        let Some(idx) = queues.iter_mut().find_map(VecDeque::pop_front) else {
            match arrivals.peek_time() {
                Some(next_arrival) => {
                    clock = next_arrival;
                    continue;
                }
                None => break,
            }
        };

        let level = states[idx].queue_level;
        let quantum = quanta[level].unwrap_or(Ticks::MAX);
        let state = &mut states[idx];
        state.dispatch();
        let slice = state.run_for(quantum);
        trace!(
            "mlfq: {} runs {}..{} at level {}",
            state.id(),
            clock,
            clock + slice,
            level
        );
        timeline.push(state.id(), clock, clock + slice);
        clock += slice;

        // Arrivals strictly inside the slice
        while let Some(arrived) = arrivals.pop_arrived_before(clock) {
            enqueue_arrival(&mut states, &mut queues, arrived);
        }

        let state = &mut states[idx];
        if !state.is_finished() {
            state.mark_preempted();
            state.demote(MLFQ_LEVELS - 1);
            debug!(
                "mlfq: {} used its quantum, demoted to level {}",
                state.id(),
                state.queue_level
            );
            queues[state.queue_level].push_back(idx);
        }
    }

    timeline
}

fn enqueue_arrival(
    states: &mut [ProcessState],
    queues: &mut [VecDeque<usize>; MLFQ_LEVELS],
    idx: usize,
) {
    states[idx].admit();
    queues[states[idx].queue_level].push_back(idx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::ExecutionInterval;

    #[test]
    fn test_mlfq_reference_workload() {
        let processes = vec![
            Process::new("P1", 0, 10),
            Process::new("P2", 2, 5),
            Process::new("P3", 4, 8),
        ];
        assert_eq!(
            schedule(&processes, 4, 8).intervals(),
            &[
                ExecutionInterval::new("P1", 0, 4),
                ExecutionInterval::new("P2", 4, 8),
                ExecutionInterval::new("P3", 8, 12),
                ExecutionInterval::new("P1", 12, 18),
                ExecutionInterval::new("P2", 18, 19),
                ExecutionInterval::new("P3", 19, 23),
            ]
        );
    }

    #[test]
    fn test_mlfq_demotes_through_every_level() {
        let processes = vec![Process::new("P1", 0, 20)];
        assert_eq!(
            schedule(&processes, 4, 8).intervals(),
            &[
                ExecutionInterval::new("P1", 0, 4),
                ExecutionInterval::new("P1", 4, 12),
                ExecutionInterval::new("P1", 12, 20),
            ]
        );
    }

    #[test]
    fn test_mlfq_mid_slice_arrival_waits_for_slice_end() {
        let processes = vec![Process::new("A", 0, 10), Process::new("B", 1, 2)];
        assert_eq!(
            schedule(&processes, 4, 8).intervals(),
            &[
                ExecutionInterval::new("A", 0, 4),
                ExecutionInterval::new("B", 4, 6),
                ExecutionInterval::new("A", 6, 12),
            ]
        );
    }

    #[test]
    fn test_mlfq_bottom_level_runs_to_completion() {
        // B arrives while A is in its level-2 slice and must wait for A to finish
        let processes = vec![Process::new("A", 0, 30), Process::new("B", 13, 2)];
        assert_eq!(
            schedule(&processes, 4, 8).intervals(),
            &[
                ExecutionInterval::new("A", 0, 4),
                ExecutionInterval::new("A", 4, 12),
                ExecutionInterval::new("A", 12, 30),
                ExecutionInterval::new("B", 30, 32),
            ]
        );
    }

    #[test]
    fn test_mlfq_higher_level_preferred() {
        // C arrives at 4 and runs before B, which was demoted to level 1
        let processes = vec![Process::new("B", 0, 6), Process::new("C", 4, 3)];
        assert_eq!(
            schedule(&processes, 4, 8).intervals(),
            &[
                ExecutionInterval::new("B", 0, 4),
                ExecutionInterval::new("C", 4, 7),
                ExecutionInterval::new("B", 7, 9),
            ]
        );
    }

    #[test]
    fn test_mlfq_idle_gap() {
        let processes = vec![Process::new("P1", 5, 2)];
        assert_eq!(
            schedule(&processes, 4, 8).intervals(),
            &[ExecutionInterval::new("P1", 5, 7)]
        );
    }

    #[test]
    fn test_mlfq_demoted_process_starves_under_steady_arrivals() {
        let mut processes = vec![Process::new("long", 0, 20)];
        for i in 1..=5 {
            processes.push(Process::new(format!("A{}", i), 4 * i, 4));
        }

        let timeline = schedule(&processes, 4, 8);
        let long: Vec<_> = timeline.intervals_for("long").collect();
        assert_eq!(long[0], &ExecutionInterval::new("long", 0, 4));
        // no slice until the stream of level-0 arrivals dries up
        assert_eq!(long[1], &ExecutionInterval::new("long", 24, 32));
        assert_eq!(long[2], &ExecutionInterval::new("long", 32, 40));
    }
}
