use crate::process::{arrival_order, Process, Ticks};
use crate::timeline::Timeline;
use log::trace;

/// First-come-first-served: run every process to completion in arrival order
pub(crate) fn schedule(processes: &[Process]) -> Timeline {
    let mut timeline = Timeline::with_capacity(processes.len());
    let mut clock: Ticks = 0;

    for idx in arrival_order(processes) {
        let process = &processes[idx];
        let start = clock.max(process.arrival_time);
        let end = start + process.burst_time;
        trace!("fifo: {} runs {}..{}", process.id, start, end);
        timeline.push(&process.id, start, end);
        clock = end;
    }

    timeline
}
