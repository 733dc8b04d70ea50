use super::interval::ExecutionInterval;
use crate::process::Ticks;
use serde::Serialize;

/// Ordered execution intervals produced by one policy run.
///
/// Insertion order is chronological order. A `Timeline` handed back by a
/// policy is read-only: there is no public way to append to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    intervals: Vec<ExecutionInterval>,
}

impl Timeline {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, process_id: &str, start_time: Ticks, end_time: Ticks) {
        debug_assert!(end_time > start_time, "empty interval for {}", process_id);
        debug_assert!(
            self.makespan() <= start_time,
            "interval for {} overlaps the previous one",
            process_id
        );
        self.intervals
            .push(ExecutionInterval::new(process_id, start_time, end_time));
    }

    pub fn intervals(&self) -> &[ExecutionInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionInterval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn into_intervals(self) -> Vec<ExecutionInterval> {
        self.intervals
    }

    /// End of the last interval (0 for an empty timeline)
    pub fn makespan(&self) -> Ticks {
        self.intervals.last().map(|i| i.end_time).unwrap_or(0)
    }

    /// Total non-idle time
    pub fn busy_time(&self) -> Ticks {
        self.intervals.iter().map(ExecutionInterval::duration).sum()
    }

    pub fn intervals_for<'a>(
        &'a self,
        process_id: &'a str,
    ) -> impl Iterator<Item = &'a ExecutionInterval> + 'a {
        self.intervals
            .iter()
            .filter(move |i| i.process_id == process_id)
    }

    pub fn busy_time_for(&self, process_id: &str) -> Ticks {
        self.intervals_for(process_id)
            .map(ExecutionInterval::duration)
            .sum()
    }

    /// First dispatch of a process
    pub fn first_start(&self, process_id: &str) -> Option<Ticks> {
        self.intervals_for(process_id).next().map(|i| i.start_time)
    }

    /// End of a process's last interval
    pub fn completion_time(&self, process_id: &str) -> Option<Ticks> {
        self.intervals_for(process_id).last().map(|i| i.end_time)
    }

    /// Number of adjacent interval pairs that hand the CPU to a different process
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|pair| pair[0].process_id != pair[1].process_id)
            .count()
    }
}

impl From<Vec<ExecutionInterval>> for Timeline {
    fn from(intervals: Vec<ExecutionInterval>) -> Self {
        Self { intervals }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ExecutionInterval;
    type IntoIter = std::slice::Iter<'a, ExecutionInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Builds a timeline for tick-driven policies, coalescing consecutive ticks of
/// the same process into one interval until the next context switch.
#[derive(Debug, Default)]
pub(crate) struct IntervalRecorder {
    timeline: Timeline,
    // (process index, process id, interval start)
    open: Option<(usize, String, Ticks)>,
}

impl IntervalRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the process whose interval is currently open
    pub fn current(&self) -> Option<usize> {
        self.open.as_ref().map(|(index, _, _)| *index)
    }

    /// Close any open interval at `clock` and open one for `index`
    pub fn switch_to(&mut self, index: usize, process_id: &str, clock: Ticks) {
        self.close(clock);
        self.open = Some((index, process_id.to_string(), clock));
    }

    /// Close the open interval at `clock`, if there is one
    pub fn close(&mut self, clock: Ticks) {
        if let Some((_, process_id, start)) = self.open.take() {
            if clock > start {
                self.timeline.push(&process_id, start, clock);
            }
        }
    }

    pub fn finish(mut self, clock: Ticks) -> Timeline {
        self.close(clock);
        self.timeline
    }
}
