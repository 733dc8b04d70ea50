use super::arrivals::ArrivalQueue;
use crate::process::{runtime_states, Process, ProcessState, Ticks};
use crate::timeline::{IntervalRecorder, Timeline};
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// (remaining, arrival_time, input index): smallest wins
type Priority = (Ticks, Ticks, usize);

fn priority(states: &[ProcessState], idx: usize) -> Priority {
    (states[idx].remaining, states[idx].arrival_time(), idx)
}

/// Shortest time-to-completion first (preemptive SJF).
///
/// Conceptually a unit-tick loop that always runs the arrived process with the
/// least remaining time. The running process only gets more favourable as it
/// runs, so the decision can change only when a new process arrives; the loop
/// therefore advances straight to the next arrival or completion, which yields
/// exactly the per-tick timeline. Consecutive ticks of one process coalesce
/// into a single interval until the next context switch.
pub(crate) fn schedule(processes: &[Process]) -> Timeline {
    let mut states = runtime_states(processes);
    let mut arrivals = ArrivalQueue::new(processes);
    // Ready, not running. A queued process's remaining time is frozen.
    let mut ready: BinaryHeap<Reverse<Priority>> = BinaryHeap::new();
    let mut recorder = IntervalRecorder::new();
    let mut running: Option<usize> = None;
    let mut clock: Ticks = 0;

    loop {
        while let Some(idx) = arrivals.pop_arrived(clock) {
            states[idx].admit();
            ready.push(Reverse(priority(&states, idx)));
        }

        if let Some(&Reverse(candidate)) = ready.peek() {
            let switch = match running {
                None => true,
                Some(current) => candidate < priority(&states, current),
            };
            if switch {
                ready.pop();
                let next = candidate.2;
                if let Some(current) = running {
                    debug!(
                        "stcf: {} (remaining {}) preempted by {} (remaining {}) at {}",
                        states[current].id(),
                        states[current].remaining,
                        states[next].id(),
                        states[next].remaining,
                        clock
                    );
                    states[current].mark_preempted();
                    ready.push(Reverse(priority(&states, current)));
                }
                states[next].dispatch();
                recorder.switch_to(next, states[next].id(), clock);
                running = Some(next);
            }
        }

        let Some(current) = running else {
            match arrivals.peek_time() {
                Some(next_arrival) => {
                    trace!("stcf: idle {}..{}", clock, next_arrival);
                    clock = next_arrival;
                    continue;
                }
                None => break,
            }
        };

        // Everything at or before `clock` is admitted, so the next arrival is in the future
        let until_completion = states[current].remaining;
        let step = arrivals
            .peek_time()
            .map_or(until_completion, |next_arrival| {
                (next_arrival - clock).min(until_completion)
            });
        states[current].run_for(step);
        clock += step;

        if states[current].is_finished() {
            trace!("stcf: {} completes at {}", states[current].id(), clock);
            recorder.close(clock);
            running = None;
        }
    }

    debug_assert_eq!(recorder.current(), None);
    recorder.finish(clock)
}
