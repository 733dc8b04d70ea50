mod arrivals;
pub mod fifo;
pub mod mlfq;
pub mod policy;
pub mod round_robin;
pub mod scheduler;
pub mod sjf;
pub mod stcf;

pub use mlfq::MLFQ_LEVELS;
pub use policy::SchedulingPolicy;
pub use scheduler::{schedule, Scheduler};
