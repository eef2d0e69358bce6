//! Speech and ambient synthesis errors.

/// Specific failure conditions for a single synthesis task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SynthesisErrorKind {
    /// Nothing to synthesize
    #[display("Input text is empty")]
    EmptyInput,
    /// Backend returned no audio bytes
    #[display("Backend '{}' returned no audio", _0)]
    EmptyAudio(String),
    /// Backend rejected or failed the request
    #[display("Backend error: {}", _0)]
    Backend(String),
    /// Backend response could not be decoded
    #[display("Malformed backend response: {}", _0)]
    MalformedResponse(String),
    /// Task exceeded its wall-clock budget
    #[display("Timed out after {}s", _0)]
    Timeout(u64),
    /// Worker task panicked or was cancelled
    #[display("Worker task failed: {}", _0)]
    Join(String),
}

/// Synthesis error with location tracking.
///
/// # Examples
///
/// ```
/// use texttale_error::{SynthesisError, SynthesisErrorKind};
///
/// let err = SynthesisError::new(SynthesisErrorKind::Timeout(30));
/// assert!(format!("{}", err).contains("Timed out after 30s"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Synthesis Error: {} at line {} in {}", kind, line, file)]
pub struct SynthesisError {
    /// The kind of error that occurred
    pub kind: SynthesisErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SynthesisError {
    /// Create a new synthesis error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SynthesisErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
