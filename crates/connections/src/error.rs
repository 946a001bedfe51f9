use thiserror::Error;

/// A single failed attempt, reported to the sink and then swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{resource_name} connection error: {reason}")]
pub struct AttemptError {
    pub resource_name: String,
    /// Zero-based index of the failed attempt.
    pub attempt: u32,
    pub reason: String,
}

/// Terminal failure of a wait.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    /// Every attempt failed. Per-attempt reasons were already reported.
    #[error("was not able to connect to {resource_name}")]
    Exhausted { resource_name: String, attempts: u32 },
}
