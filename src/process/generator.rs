use super::Process;
use crate::config::WorkloadConfig;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

/// Generates a synthetic process set from a workload configuration.
///
/// The same workload (including seed) always yields the same processes.
pub struct ProcessGenerator {
    workload: WorkloadConfig,
    rng: StdRng,
}

impl ProcessGenerator {
    pub fn new(workload: WorkloadConfig) -> Result<Self, String> {
        workload.validate()?;
        let rng = StdRng::seed_from_u64(workload.seed);
        Ok(Self { workload, rng })
    }

    /// Generate the full process set, sorted by arrival time, with ids `P1..Pn`
    pub fn generate(&mut self) -> Vec<Process> {
        let mut arrivals: Vec<u64> = Vec::with_capacity(self.workload.num_processes);
        let mut clock = 0.0;
        for index in 0..self.workload.num_processes {
            let arrival = self.sample_arrival(index, &mut clock);
            arrivals.push(arrival);
        }
        arrivals.sort_unstable();

        arrivals
            .into_iter()
            .enumerate()
            .map(|(i, arrival_time)| {
                let burst_time = self.workload.burst_time_dist.sample(&mut self.rng);
                Process::new(format!("P{}", i + 1), arrival_time, burst_time)
            })
            .collect()
    }

    /// Sample the arrival tick of the `index`-th process; `clock` carries the
    /// continuous arrival time for the cumulative patterns
    fn sample_arrival(&mut self, index: usize, clock: &mut f64) -> u64 {
        match self.workload.arrival_pattern.to_lowercase().as_str() {
            "poisson" => {
                // First arrival is pinned to 0 so the run does not open idle
                if index > 0 {
                    if let Ok(exp) = Exp::new(self.workload.arrival_rate) {
                        *clock += exp.sample(&mut self.rng);
                    }
                }
                clock.floor() as u64
            }
            "fixed_rate" => {
                let arrival = clock.floor() as u64;
                *clock += 1.0 / self.workload.arrival_rate;
                arrival
            }
            "uniform" => self.rng.gen_range(0..=self.workload.max_arrival_time),
            // "batched"; validate() rejects anything else
            _ => 0,
        }
    }
}

/// Convenience wrapper: validate the workload and generate its processes
pub fn generate_processes(workload: &WorkloadConfig) -> Result<Vec<Process>, String> {
    Ok(ProcessGenerator::new(workload.clone())?.generate())
}
