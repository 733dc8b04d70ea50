pub mod gantt;
pub mod interval;
pub mod timeline;

pub use gantt::render_gantt;
pub use interval::ExecutionInterval;
pub(crate) use timeline::IntervalRecorder;
pub use timeline::Timeline;
