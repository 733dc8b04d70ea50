use super::arrivals::ArrivalQueue;
use crate::process::{Process, Ticks};
use crate::timeline::Timeline;
use log::trace;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Non-preemptive shortest job first.
///
/// Selection happens only when the CPU frees up: among arrived processes the
/// smallest burst wins, then the earliest arrival, then input order.
pub(crate) fn schedule(processes: &[Process]) -> Timeline {
    let mut timeline = Timeline::with_capacity(processes.len());
    let mut arrivals = ArrivalQueue::new(processes);
    // (burst_time, arrival_time, input index)
    let mut ready: BinaryHeap<Reverse<(Ticks, Ticks, usize)>> = BinaryHeap::new();
    let mut clock: Ticks = 0;

    loop {
        while let Some(idx) = arrivals.pop_arrived(clock) {
            let process = &processes[idx];
            ready.push(Reverse((process.burst_time, process.arrival_time, idx)));
        }

        let Some(Reverse((burst_time, _, idx))) = ready.pop() else {
            match arrivals.peek_time() {
                Some(next_arrival) => {
                    clock = next_arrival;
                    continue;
                }
                None => break,
            }
        };

        let process = &processes[idx];
        trace!("sjf: {} runs {}..{}", process.id, clock, clock + burst_time);
        timeline.push(&process.id, clock, clock + burst_time);
        clock += burst_time;
    }

    timeline
}
