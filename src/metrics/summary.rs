use super::collector::ProcessMetrics;
use crate::process::Ticks;
use serde::Serialize;

/// Summary of one policy run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub num_processes: usize,

    // Time accounting (ticks)
    pub makespan: Ticks,
    pub busy_time: Ticks,
    pub idle_time: Ticks,

    /// busy / makespan (0 for an empty run)
    pub cpu_utilization: f64,
    /// Completed processes per tick
    pub throughput: f64,

    // Per-process averages (ticks)
    pub avg_turnaround_time: f64,
    pub avg_waiting_time: f64,
    pub avg_response_time: f64,

    // Waiting time distribution
    pub waiting_p50: Ticks,
    pub waiting_p90: Ticks,
    pub max_waiting_time: Ticks,

    // Preemption metrics
    pub total_preemptions: usize,
    pub context_switches: usize,
}

impl MetricsSummary {
    pub fn from_process_metrics(
        metrics: &[ProcessMetrics],
        makespan: Ticks,
        busy_time: Ticks,
        context_switches: usize,
    ) -> Self {
        let n = metrics.len();
        let mut waiting: Vec<Ticks> = metrics.iter().map(|m| m.waiting_time).collect();
        waiting.sort_unstable();

        let ratio = |num: f64, den: Ticks| if den == 0 { 0.0 } else { num / den as f64 };

        Self {
            num_processes: n,
            makespan,
            busy_time,
            idle_time: makespan.saturating_sub(busy_time),
            cpu_utilization: ratio(busy_time as f64, makespan),
            throughput: ratio(n as f64, makespan),
            avg_turnaround_time: mean(metrics.iter().map(|m| m.turnaround_time)),
            avg_waiting_time: mean(metrics.iter().map(|m| m.waiting_time)),
            avg_response_time: mean(metrics.iter().map(|m| m.response_time)),
            waiting_p50: percentile(&waiting, 0.50),
            waiting_p90: percentile(&waiting, 0.90),
            max_waiting_time: waiting.last().copied().unwrap_or(0),
            total_preemptions: metrics.iter().map(|m| m.num_preemptions).sum(),
            context_switches,
        }
    }

    pub fn print(&self) {
        println!("  Processes:        {}", self.num_processes);
        println!(
            "  Makespan:         {} ticks ({} busy, {} idle)",
            self.makespan, self.busy_time, self.idle_time
        );
        println!("  CPU utilization:  {:.1}%", self.cpu_utilization * 100.0);
        println!("  Throughput:       {:.3} processes/tick", self.throughput);
        println!("  Avg turnaround:   {:.2}", self.avg_turnaround_time);
        println!(
            "  Avg waiting:      {:.2} (p50={}, p90={}, max={})",
            self.avg_waiting_time, self.waiting_p50, self.waiting_p90, self.max_waiting_time
        );
        println!("  Avg response:     {:.2}", self.avg_response_time);
        println!(
            "  Preemptions:      {} ({} context switches)",
            self.total_preemptions, self.context_switches
        );
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    let (sum, count) = values.fold((0u64, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Nearest-rank percentile over sorted samples
fn percentile(sorted: &[Ticks], p: f64) -> Ticks {
    if sorted.is_empty() {
        return 0;
    }
    let rank = ((p * sorted.len() as f64).ceil() as usize).clamp(1, sorted.len());
    sorted[rank - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(waiting_time: Ticks, turnaround_time: Ticks, response_time: Ticks) -> ProcessMetrics {
        ProcessMetrics {
            id: "P".to_string(),
            arrival_time: 0,
            burst_time: turnaround_time - waiting_time,
            first_start: response_time,
            completion_time: turnaround_time,
            turnaround_time,
            waiting_time,
            response_time,
            num_intervals: 2,
            num_preemptions: 1,
        }
    }

    #[test]
    fn test_summary() {
        let metrics = vec![metric(5, 15, 0), metric(0, 5, 0), metric(11, 19, 11)];
        let summary = MetricsSummary::from_process_metrics(&metrics, 25, 23, 4);

        assert_eq!(summary.num_processes, 3);
        assert_eq!(summary.idle_time, 2);
        assert!((summary.cpu_utilization - 23.0 / 25.0).abs() < 1e-9);
        assert!((summary.throughput - 3.0 / 25.0).abs() < 1e-9);
        assert!((summary.avg_turnaround_time - 13.0).abs() < 1e-9);
        assert!((summary.avg_waiting_time - 16.0 / 3.0).abs() < 1e-9);
        assert!((summary.avg_response_time - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.waiting_p50, 5);
        assert_eq!(summary.waiting_p90, 11);
        assert_eq!(summary.max_waiting_time, 11);
        assert_eq!(summary.total_preemptions, 3);
        assert_eq!(summary.context_switches, 4);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MetricsSummary::from_process_metrics(&[], 0, 0, 0);
        assert_eq!(summary.num_processes, 0);
        assert_eq!(summary.cpu_utilization, 0.0);
        assert_eq!(summary.throughput, 0.0);
        assert_eq!(summary.avg_waiting_time, 0.0);
        assert_eq!(summary.max_waiting_time, 0);
    }

    #[test]
    fn test_percentile() {
        let samples: Vec<Ticks> = (1..=10).collect();
        assert_eq!(percentile(&samples, 0.5), 5);
        assert_eq!(percentile(&samples, 0.9), 9);
        assert_eq!(percentile(&samples, 1.0), 10);
        assert_eq!(percentile(&samples, 0.0), 1);
        assert_eq!(percentile(&[], 0.5), 0);
    }

    #[test]
    fn test_percentile_small_sample_uses_nearest_rank() {
        // rank ceil(0.9 * 3) = 3 picks the largest sample
        let waiting: Vec<Ticks> = vec![0, 1, 6];
        assert_eq!(percentile(&waiting, 0.5), 1);
        assert_eq!(percentile(&waiting, 0.9), 6);
    }
}
