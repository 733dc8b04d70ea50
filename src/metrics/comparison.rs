use super::summary::MetricsSummary;
use crate::scheduler::SchedulingPolicy;
use ordered_float::OrderedFloat;

/// Side-by-side summaries of several policies over the same process set
#[derive(Debug, Clone, Default)]
pub struct PolicyComparison<'a> {
    entries: Vec<(SchedulingPolicy, &'a MetricsSummary)>,
}

impl<'a> PolicyComparison<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, policy: SchedulingPolicy, summary: &'a MetricsSummary) {
        self.entries.push((policy, summary));
        // ties resolve to the earlier policy in canonical order
        self.entries.sort_by_key(|(policy, _)| *policy);
    }

    pub fn entries(&self) -> &[(SchedulingPolicy, &'a MetricsSummary)] {
        &self.entries
    }

    pub fn best_by_waiting_time(&self) -> Option<SchedulingPolicy> {
        self.best_by(|s| s.avg_waiting_time)
    }

    pub fn best_by_turnaround_time(&self) -> Option<SchedulingPolicy> {
        self.best_by(|s| s.avg_turnaround_time)
    }

    pub fn best_by_response_time(&self) -> Option<SchedulingPolicy> {
        self.best_by(|s| s.avg_response_time)
    }

    fn best_by(&self, key: impl Fn(&MetricsSummary) -> f64) -> Option<SchedulingPolicy> {
        self.entries
            .iter()
            .min_by_key(|(_, summary)| OrderedFloat(key(summary)))
            .map(|(policy, _)| *policy)
    }
}
