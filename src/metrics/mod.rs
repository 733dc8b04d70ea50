pub mod collector;
pub mod comparison;
pub mod summary;

pub use collector::{MetricsCollector, ProcessMetrics};
pub use comparison::PolicyComparison;
pub use summary::MetricsSummary;
