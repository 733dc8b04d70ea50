use serde::Deserialize;

/// Random process-set generation, used when no explicit process list is given
#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadConfig {
    /// Number of processes to generate
    pub num_processes: usize,

    /// Arrival pattern: "poisson", "uniform", "fixed_rate", "batched"
    #[serde(default = "default_arrival_pattern")]
    pub arrival_pattern: String,

    /// Mean arrivals per tick ("poisson" and "fixed_rate")
    #[serde(default = "default_arrival_rate")]
    pub arrival_rate: f64,

    /// Latest possible arrival tick ("uniform")
    #[serde(default = "default_max_arrival_time")]
    pub max_arrival_time: u64,

    /// Burst time distribution
    #[serde(default = "default_burst_time_dist")]
    pub burst_time_dist: BurstDistribution,

    /// Random seed for reproducibility
    #[serde(default)]
    pub seed: u64,
}

fn default_arrival_pattern() -> String {
    "poisson".to_string()
}

fn default_arrival_rate() -> f64 {
    0.5
}

fn default_max_arrival_time() -> u64 {
    20
}

fn default_burst_time_dist() -> BurstDistribution {
    BurstDistribution::Uniform { min: 1, max: 10 }
}

impl WorkloadConfig {
    /// A workload of `num_processes` with every other field at its default
    pub fn with_count(num_processes: usize, seed: u64) -> Self {
        Self {
            num_processes,
            arrival_pattern: default_arrival_pattern(),
            arrival_rate: default_arrival_rate(),
            max_arrival_time: default_max_arrival_time(),
            burst_time_dist: default_burst_time_dist(),
            seed,
        }
    }

    /// Reject parameter combinations the samplers cannot handle
    pub fn validate(&self) -> Result<(), String> {
        match self.arrival_pattern.to_lowercase().as_str() {
            "poisson" | "fixed_rate" => {
                if !(self.arrival_rate.is_finite() && self.arrival_rate > 0.0) {
                    return Err(format!(
                        "arrival_rate must be positive for the {} pattern (got {})",
                        self.arrival_pattern, self.arrival_rate
                    ));
                }
            }
            "uniform" | "batched" => {}
            other => return Err(format!("Unknown arrival pattern: {}", other)),
        }
        self.burst_time_dist.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BurstDistribution {
    #[serde(rename = "fixed")]
    Fixed { value: u64 },

    #[serde(rename = "uniform")]
    Uniform { min: u64, max: u64 },

    #[serde(rename = "normal")]
    Normal { mean: f64, std_dev: f64 },

    #[serde(rename = "lognormal")]
    LogNormal { mean: f64, std_dev: f64 },
}

impl BurstDistribution {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            BurstDistribution::Fixed { value } if *value == 0 => {
                Err("fixed burst time must be positive".to_string())
            }
            BurstDistribution::Uniform { min, max } if min > max || *max == 0 => Err(format!(
                "uniform burst range is empty or zero (min={}, max={})",
                min, max
            )),
            BurstDistribution::Normal { std_dev, .. }
            | BurstDistribution::LogNormal { std_dev, .. }
                if !(std_dev.is_finite() && *std_dev >= 0.0) =>
            {
                Err(format!("std_dev must be finite and non-negative (got {})", std_dev))
            }
            _ => Ok(()),
        }
    }

    /// Sample a burst time; always at least 1 tick
    pub fn sample<R: rand::Rng>(&self, rng: &mut R) -> u64 {
        use rand_distr::Distribution;

        match self {
            BurstDistribution::Fixed { value } => (*value).max(1),
            BurstDistribution::Uniform { min, max } => rng.gen_range(*min..=*max).max(1),
            BurstDistribution::Normal { mean, std_dev } => {
                match rand_distr::Normal::new(*mean, *std_dev) {
                    Ok(normal) => normal.sample(rng).round().max(1.0) as u64,
                    Err(_) => mean.round().max(1.0) as u64,
                }
            }
            BurstDistribution::LogNormal { mean, std_dev } => {
                match rand_distr::LogNormal::new(*mean, *std_dev) {
                    Ok(lognormal) => lognormal.sample(rng).round().max(1.0) as u64,
                    Err(_) => mean.exp().round().max(1.0) as u64,
                }
            }
        }
    }
}
