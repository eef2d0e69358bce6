//! Fan-out machinery errors.

/// Failures of the orchestration mechanism itself, as opposed to a task failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OrchestrationErrorKind {
    /// Worker pool cannot be built with the requested ceiling
    #[display("Invalid worker limit: {}", _0)]
    InvalidWorkerLimit(usize),
    /// Task budget of zero would fail every task before it starts
    #[display("Invalid task timeout: {}s", _0)]
    InvalidTimeout(u64),
    /// Worker pool was shut down while the request was running
    #[display("Worker pool closed: {}", _0)]
    PoolClosed(String),
}

/// Orchestration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Orchestration Error: {} at line {} in {}", kind, line, file)]
pub struct OrchestrationError {
    /// The kind of error that occurred
    pub kind: OrchestrationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl OrchestrationError {
    /// Create a new orchestration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: OrchestrationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
