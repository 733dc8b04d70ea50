use super::summary::MetricsSummary;
use crate::process::{Process, Ticks};
use crate::timeline::{ExecutionInterval, Timeline};
use log::warn;
use serde::Serialize;
use std::collections::HashMap;

/// Derived statistics for one process in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// First dispatch
    pub first_start: Ticks,
    pub completion_time: Ticks,
    /// completion - arrival
    pub turnaround_time: Ticks,
    /// turnaround - burst
    pub waiting_time: Ticks,
    /// first dispatch - arrival
    pub response_time: Ticks,
    pub num_intervals: usize,
    pub num_preemptions: usize,
}

/// Accumulates per-process statistics from a timeline
pub struct MetricsCollector<'a> {
    processes: &'a [Process],
    index: HashMap<&'a str, usize>,

    first_start: Vec<Option<Ticks>>,
    completion: Vec<Option<Ticks>>,
    cpu_time: Vec<Ticks>,
    num_intervals: Vec<usize>,

    busy_time: Ticks,
    makespan: Ticks,
    context_switches: usize,
    last_process: Option<usize>,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(processes: &'a [Process]) -> Self {
        let index = processes
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.as_str(), idx))
            .collect();
        let n = processes.len();

        Self {
            processes,
            index,
            first_start: vec![None; n],
            completion: vec![None; n],
            cpu_time: vec![0; n],
            num_intervals: vec![0; n],
            busy_time: 0,
            makespan: 0,
            context_switches: 0,
            last_process: None,
        }
    }

    /// Build a collector and feed it a whole timeline
    pub fn from_timeline(processes: &'a [Process], timeline: &Timeline) -> Self {
        let mut collector = Self::new(processes);
        for interval in timeline {
            collector.record_interval(interval);
        }
        collector
    }

    /// Record one execution interval; intervals must arrive in chronological order
    pub fn record_interval(&mut self, interval: &ExecutionInterval) {
        let Some(&idx) = self.index.get(interval.process_id.as_str()) else {
            warn!(
                "Ignoring interval for unknown process {:?}",
                interval.process_id
            );
            return;
        };

        if self.first_start[idx].is_none() {
            self.first_start[idx] = Some(interval.start_time);
        }
        self.completion[idx] = Some(interval.end_time);
        self.cpu_time[idx] += interval.duration();
        self.num_intervals[idx] += 1;

        if matches!(self.last_process, Some(last) if last != idx) {
            self.context_switches += 1;
        }
        self.last_process = Some(idx);
        self.busy_time += interval.duration();
        self.makespan = self.makespan.max(interval.end_time);
    }

    /// True when every process received exactly its burst time
    pub fn is_conserved(&self) -> bool {
        self.processes
            .iter()
            .zip(&self.cpu_time)
            .all(|(p, &cpu)| cpu == p.burst_time)
    }

    /// Metrics for every process that ran, in input order
    pub fn process_metrics(&self) -> Vec<ProcessMetrics> {
        self.processes
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| {
                let first_start = self.first_start[idx]?;
                let completion_time = self.completion[idx]?;
                let turnaround_time = completion_time.saturating_sub(p.arrival_time);
                Some(ProcessMetrics {
                    id: p.id.clone(),
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    first_start,
                    completion_time,
                    turnaround_time,
                    waiting_time: turnaround_time.saturating_sub(p.burst_time),
                    response_time: first_start.saturating_sub(p.arrival_time),
                    num_intervals: self.num_intervals[idx],
                    num_preemptions: self.num_intervals[idx].saturating_sub(1),
                })
            })
            .collect()
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary::from_process_metrics(
            &self.process_metrics(),
            self.makespan,
            self.busy_time,
            self.context_switches,
        )
    }
}
