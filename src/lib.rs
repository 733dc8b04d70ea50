pub mod config;
pub mod error;
pub mod metrics;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod timeline;

#[cfg(feature = "cli")]
pub mod visualization;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export key types
pub use config::Config;
pub use error::ScheduleError;
pub use metrics::{MetricsCollector, MetricsSummary, PolicyComparison, ProcessMetrics};
pub use process::{Process, ProcessState, ProcessStatus, Ticks};
pub use scheduler::{schedule, Scheduler, SchedulingPolicy};
pub use simulation::{PolicyRun, SimulationError, SimulationReport, Simulator};
pub use timeline::{render_gantt, ExecutionInterval, Timeline};

#[cfg(feature = "cli")]
pub use visualization::{generate_plots, plot_gantt};
