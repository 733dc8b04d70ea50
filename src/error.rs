use thiserror::Error;

/// Errors raised before a policy simulates anything.
///
/// Validation is all-or-nothing: a batch with a single bad process yields
/// one of these and no timeline at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid process {id:?}: {reason}")]
    InvalidProcess { id: String, reason: String },

    #[error("Invalid configuration: {parameter} must be a positive integer (got {value})")]
    InvalidConfiguration { parameter: &'static str, value: u64 },

    #[error("Unknown scheduling policy: {0}")]
    UnknownPolicy(String),
}

impl ScheduleError {
    pub(crate) fn invalid_process(id: &str, reason: impl Into<String>) -> Self {
        ScheduleError::InvalidProcess {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
