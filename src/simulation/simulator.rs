use crate::config::Config;
use crate::error::ScheduleError;
use crate::metrics::{MetricsCollector, MetricsSummary, PolicyComparison, ProcessMetrics};
use crate::process::{validate_processes, Process, Ticks};
use crate::scheduler::{Scheduler, SchedulingPolicy};
use crate::timeline::Timeline;
use log::{debug, info};
use serde::Serialize;
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Simulated horizon of {horizon} ticks exceeds the limit of {limit}")]
    HorizonExceeded { horizon: Ticks, limit: Ticks },

    #[error("Workload generation failed: {0}")]
    Workload(String),

    #[error("Worker running {0} panicked")]
    WorkerPanicked(SchedulingPolicy),
}

/// Result of running one policy over the simulator's process set
#[derive(Debug, Clone, Serialize)]
pub struct PolicyRun {
    pub policy: SchedulingPolicy,
    pub timeline: Timeline,
    pub summary: MetricsSummary,
    pub processes: Vec<ProcessMetrics>,
}

/// Everything a simulation produced, in export order
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub processes: Vec<Process>,
    pub runs: Vec<PolicyRun>,
}

impl SimulationReport {
    pub fn comparison(&self) -> PolicyComparison<'_> {
        let mut comparison = PolicyComparison::new();
        for run in &self.runs {
            comparison.add(run.policy, &run.summary);
        }
        comparison
    }
}

pub struct Simulator {
    scheduler: Scheduler,
    processes: Vec<Process>,
    policies: Vec<SchedulingPolicy>,
    parallel: bool,
}

impl Simulator {
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        let scheduler = Scheduler::new(config.scheduler.clone())?;
        let policies = config.scheduler.policies()?;
        let processes = config
            .resolve_processes()
            .map_err(SimulationError::Workload)?;
        validate_processes(&processes)?;

        let limit = config.simulation.max_simulated_time;
        let horizon = horizon(&processes);
        if horizon > limit {
            return Err(SimulationError::HorizonExceeded { horizon, limit });
        }

        Ok(Self {
            scheduler,
            processes,
            policies,
            parallel: config.simulation.parallel && cfg!(not(target_arch = "wasm32")),
        })
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Policies selected by the configuration, in canonical order
    pub fn policies(&self) -> &[SchedulingPolicy] {
        &self.policies
    }

    /// Latest tick any policy can reach on this process set
    pub fn horizon(&self) -> Ticks {
        horizon(&self.processes)
    }

    /// Run a single policy
    pub fn run(&self, policy: SchedulingPolicy) -> Result<PolicyRun, SimulationError> {
        let timeline = self.scheduler.schedule(policy, &self.processes)?;
        let collector = MetricsCollector::from_timeline(&self.processes, &timeline);
        debug_assert!(collector.is_conserved());

        Ok(PolicyRun {
            policy,
            summary: collector.summary(),
            processes: collector.process_metrics(),
            timeline,
        })
    }

    /// Run every configured policy
    pub fn run_all(&self) -> Result<SimulationReport, SimulationError> {
        let runs = self.run_policies(&self.policies)?;
        Ok(SimulationReport {
            processes: self.processes.clone(),
            runs,
        })
    }

    /// Run the given policies; results come back in canonical policy order
    pub fn run_policies(
        &self,
        policies: &[SchedulingPolicy],
    ) -> Result<Vec<PolicyRun>, SimulationError> {
        let mut policies = policies.to_vec();
        policies.sort();
        policies.dedup();

        info!(
            "Simulating {} processes under {} policies ({})",
            self.processes.len(),
            policies.len(),
            if self.parallel && policies.len() > 1 {
                "parallel"
            } else {
                "sequential"
            }
        );

        if self.parallel && policies.len() > 1 {
            self.run_parallel(&policies)
        } else {
            policies.iter().map(|&policy| self.run(policy)).collect()
        }
    }

    /// Run the configured policies sequentially, reporting each as it finishes
    pub fn run_with_callback<F>(&self, mut callback: F) -> Result<SimulationReport, SimulationError>
    where
        F: FnMut(&PolicyRun),
    {
        let mut runs = Vec::with_capacity(self.policies.len());
        for &policy in &self.policies {
            let run = self.run(policy)?;
            callback(&run);
            runs.push(run);
        }
        Ok(SimulationReport {
            processes: self.processes.clone(),
            runs,
        })
    }

    fn run_parallel(
        &self,
        policies: &[SchedulingPolicy],
    ) -> Result<Vec<PolicyRun>, SimulationError> {
        let joined: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = policies
                .iter()
                .map(|&policy| (policy, scope.spawn(move || self.run(policy))))
                .collect();

            // every worker is joined before any result is inspected
            handles
                .into_iter()
                .map(|(policy, handle)| (policy, handle.join()))
                .collect()
        });

        joined
            .into_iter()
            .map(|(policy, result)| {
                debug!("Collected {} worker", policy);
                result.map_err(|_| SimulationError::WorkerPanicked(policy))?
            })
            .collect()
    }
}

fn horizon(processes: &[Process]) -> Ticks {
    let latest_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .fold(latest_arrival, |acc, p| acc.saturating_add(p.burst_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationConfig, WorkloadConfig};
    use crate::timeline::ExecutionInterval;

    fn create_test_simulator(parallel: bool) -> Simulator {
        let mut config = Config::test_default();
        config.simulation.parallel = parallel;
        Simulator::new(config).unwrap()
    }

    #[test]
    fn test_simulator_creation() {
        let simulator = create_test_simulator(true);
        assert_eq!(simulator.processes().len(), 3);
        assert_eq!(simulator.policies(), &SchedulingPolicy::ALL);
        assert_eq!(simulator.horizon(), 4 + 23);
    }

    #[test]
    fn test_run_single_policy() {
        let simulator = create_test_simulator(false);
        let run = simulator.run(SchedulingPolicy::Stcf).unwrap();

        assert_eq!(
            run.timeline.intervals(),
            &[
                ExecutionInterval::new("P1", 0, 2),
                ExecutionInterval::new("P2", 2, 7),
                ExecutionInterval::new("P1", 7, 15),
                ExecutionInterval::new("P3", 15, 23),
            ]
        );
        assert_eq!(run.summary.makespan, 23);
        assert_eq!(run.processes.len(), 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = create_test_simulator(true).run_all().unwrap();
        let sequential = create_test_simulator(false).run_all().unwrap();

        assert_eq!(parallel.runs.len(), 5);
        let policies: Vec<_> = parallel.runs.iter().map(|r| r.policy).collect();
        assert_eq!(policies, SchedulingPolicy::ALL.to_vec());

        for (a, b) in parallel.runs.iter().zip(&sequential.runs) {
            assert_eq!(a.policy, b.policy);
            assert_eq!(a.timeline, b.timeline);
            assert_eq!(a.summary, b.summary);
        }
    }

    #[test]
    fn test_run_policies_sorts_and_dedups() {
        let simulator = create_test_simulator(true);
        let runs = simulator
            .run_policies(&[
                SchedulingPolicy::Mlfq,
                SchedulingPolicy::Fifo,
                SchedulingPolicy::Mlfq,
            ])
            .unwrap();
        let policies: Vec<_> = runs.iter().map(|r| r.policy).collect();
        assert_eq!(policies, vec![SchedulingPolicy::Fifo, SchedulingPolicy::Mlfq]);
    }

    #[test]
    fn test_run_with_callback() {
        let simulator = create_test_simulator(false);
        let mut seen = Vec::new();
        let report = simulator
            .run_with_callback(|run| seen.push(run.policy))
            .unwrap();
        assert_eq!(seen, SchedulingPolicy::ALL.to_vec());
        assert_eq!(report.runs.len(), 5);
    }

    #[test]
    fn test_comparison() {
        let report = create_test_simulator(false).run_all().unwrap();
        let comparison = report.comparison();
        assert_eq!(comparison.entries().len(), 5);
        // STCF is optimal for mean waiting time
        assert_eq!(comparison.best_by_waiting_time(), Some(SchedulingPolicy::Stcf));
    }

    #[test]
    fn test_horizon_guard() {
        let config = Config {
            simulation: SimulationConfig {
                max_simulated_time: 20,
                ..SimulationConfig::default()
            },
            ..Config::test_default()
        };
        assert!(matches!(
            Simulator::new(config),
            Err(SimulationError::HorizonExceeded {
                horizon: 27,
                limit: 20
            })
        ));
    }

    #[test]
    fn test_invalid_processes_rejected() {
        let mut config = Config::test_default();
        config.processes.push(Process::new("P2", 9, 1));
        assert!(matches!(
            Simulator::new(config),
            Err(SimulationError::Schedule(ScheduleError::InvalidProcess { .. }))
        ));
    }

    #[test]
    fn test_generated_workload() {
        let config = Config {
            workload: Some(WorkloadConfig::with_count(12, 7)),
            processes: Vec::new(),
            ..Config::test_default()
        };
        let report = Simulator::new(config).unwrap().run_all().unwrap();
        assert_eq!(report.processes.len(), 12);
        for run in &report.runs {
            let total: Ticks = run.processes.iter().map(|p| p.burst_time).sum();
            assert_eq!(run.summary.busy_time, total);
        }
    }

    #[test]
    fn test_report_json_shape() {
        let simulator = create_test_simulator(false);
        let report = SimulationReport {
            processes: simulator.processes().to_vec(),
            runs: vec![simulator.run(SchedulingPolicy::Fifo).unwrap()],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["runs"][0]["policy"], "fifo");
        assert_eq!(value["runs"][0]["timeline"][1]["start_time"], 10);
        assert_eq!(value["processes"][2]["id"], "P3");
    }
}
