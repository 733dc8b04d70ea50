use schedsim::config::{BurstDistribution, SchedulerConfig, WorkloadConfig};
use schedsim::process::generate_processes;
use schedsim::{MetricsCollector, Process, ScheduleError, Scheduler, SchedulingPolicy, Ticks};

const TIME_QUANTUM: Ticks = 3;
const Q1: Ticks = 2;
const Q2: Ticks = 5;

fn create_test_scheduler() -> Scheduler {
    Scheduler::new(SchedulerConfig {
        policy: "all".to_string(),
        time_quantum: TIME_QUANTUM,
        q1_quantum: Q1,
        q2_quantum: Q2,
    })
    .unwrap()
}

/// Seeded workloads covering idle gaps, simultaneous arrivals and single processes
fn create_test_workloads() -> Vec<Vec<Process>> {
    let mut workloads = Vec::new();
    for seed in 0..20u64 {
        for pattern in ["poisson", "uniform", "batched"] {
            let workload = WorkloadConfig {
                num_processes: 1 + (seed as usize % 12),
                arrival_pattern: pattern.to_string(),
                arrival_rate: 0.3,
                max_arrival_time: 30,
                burst_time_dist: BurstDistribution::Uniform { min: 1, max: 12 },
                seed,
            };
            workloads.push(generate_processes(&workload).unwrap());
        }
    }
    workloads
}

#[test]
fn test_conservation_and_arrival_respect() {
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads() {
        for policy in SchedulingPolicy::ALL {
            let timeline = scheduler.schedule(policy, &processes).unwrap();
            for p in &processes {
                assert_eq!(
                    timeline.busy_time_for(&p.id),
                    p.burst_time,
                    "{} lost work for {}",
                    policy,
                    p.id
                );
                assert!(timeline
                    .intervals_for(&p.id)
                    .all(|i| i.start_time >= p.arrival_time));
            }
            assert!(MetricsCollector::from_timeline(&processes, &timeline).is_conserved());
        }
    }
}

#[test]
fn test_intervals_never_overlap() {
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads() {
        for policy in SchedulingPolicy::ALL {
            let timeline = scheduler.schedule(policy, &processes).unwrap();
            for pair in timeline.intervals().windows(2) {
                assert!(pair[0].start_time < pair[0].end_time);
                assert!(
                    pair[0].end_time <= pair[1].start_time,
                    "{} overlaps {:?} and {:?}",
                    policy,
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn test_all_policies_share_makespan() {
    // every policy is work conserving, so only the order of work differs
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads() {
        let makespans: Vec<Ticks> = SchedulingPolicy::ALL
            .iter()
            .map(|&policy| scheduler.schedule(policy, &processes).unwrap().makespan())
            .collect();
        assert!(makespans.windows(2).all(|w| w[0] == w[1]), "{:?}", makespans);
    }
}

#[test]
fn test_round_robin_fairness_bound() {
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads() {
        let timeline = scheduler.round_robin(&processes).unwrap();
        let others = processes.len().saturating_sub(1) as Ticks;

        for p in &processes {
            let slices: Vec<_> = timeline.intervals_for(&p.id).collect();
            assert!(slices.iter().all(|s| s.duration() <= TIME_QUANTUM));

            for pair in slices.windows(2) {
                let (gap_start, gap_end) = (pair[0].end_time, pair[1].start_time);
                let busy_in_gap: Ticks = timeline
                    .iter()
                    .filter(|i| i.start_time >= gap_start && i.end_time <= gap_end)
                    .map(|i| i.duration())
                    .sum();
                assert!(
                    busy_in_gap <= others * TIME_QUANTUM,
                    "{} waited {} busy ticks between slices",
                    p.id,
                    busy_in_gap
                );
            }
        }
    }
}

#[test]
fn test_mlfq_slices_follow_quanta() {
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads() {
        let timeline = scheduler.mlfq(&processes).unwrap();
        for p in &processes {
            let mut expected = vec![p.burst_time.min(Q1)];
            if p.burst_time > Q1 {
                expected.push((p.burst_time - Q1).min(Q2));
            }
            if p.burst_time > Q1 + Q2 {
                expected.push(p.burst_time - Q1 - Q2);
            }

            let slices: Vec<Ticks> = timeline.intervals_for(&p.id).map(|i| i.duration()).collect();
            assert_eq!(slices, expected, "slices of {}", p.id);
        }
    }
}

#[test]
fn test_stcf_minimizes_mean_turnaround() {
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads() {
        let mean_turnaround = |policy| {
            let timeline = scheduler.schedule(policy, &processes).unwrap();
            MetricsCollector::from_timeline(&processes, &timeline)
                .summary()
                .avg_turnaround_time
        };
        let stcf = mean_turnaround(SchedulingPolicy::Stcf);
        for policy in SchedulingPolicy::ALL {
            assert!(stcf <= mean_turnaround(policy) + 1e-9, "{} beat STCF", policy);
        }
    }
}

#[test]
fn test_runs_are_idempotent_and_leave_input_untouched() {
    let scheduler = create_test_scheduler();
    for processes in create_test_workloads().into_iter().take(10) {
        let snapshot = processes.clone();
        for policy in SchedulingPolicy::ALL {
            let first = scheduler.schedule(policy, &processes).unwrap();
            let second = scheduler.schedule(policy, &processes).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(processes, snapshot);
    }
}

#[test]
fn test_invalid_input_fails_atomically() {
    let scheduler = create_test_scheduler();
    let zero_burst = vec![Process::new("P1", 0, 4), Process::new("P2", 1, 0)];
    let duplicate = vec![Process::new("P1", 0, 4), Process::new("P1", 1, 2)];
    let empty_id = vec![Process::new("", 0, 4)];
    let clock_overflow = vec![Process::new("P1", 0, Ticks::MAX), Process::new("P2", 0, 1)];

    for policy in SchedulingPolicy::ALL {
        for processes in [&zero_burst, &duplicate, &empty_id, &clock_overflow] {
            assert!(matches!(
                scheduler.schedule(policy, processes),
                Err(ScheduleError::InvalidProcess { .. })
            ));
        }
        assert!(scheduler.schedule(policy, &[]).unwrap().is_empty());
    }

    for (time_quantum, q1_quantum, q2_quantum) in [(0, 4, 8), (4, 0, 8), (4, 4, 0)] {
        let config = SchedulerConfig {
            time_quantum,
            q1_quantum,
            q2_quantum,
            ..SchedulerConfig::default()
        };
        assert!(matches!(
            Scheduler::new(config),
            Err(ScheduleError::InvalidConfiguration { value: 0, .. })
        ));
    }
}
