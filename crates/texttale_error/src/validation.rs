//! Request validation errors.

/// One or more violated request constraints.
///
/// The violations are kept in the order they were detected so the joined
/// message reads the same way for every caller.
///
/// # Examples
///
/// ```
/// use texttale_error::ValidationError;
///
/// let err = ValidationError::new(vec![
///     "Story idea cannot be empty".to_string(),
///     "Invalid length option".to_string(),
/// ]);
/// assert_eq!(err.message(), "Story idea cannot be empty; Invalid length option");
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ValidationError {
    /// Violated constraints, in detection order
    pub violations: Vec<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    #[track_caller]
    pub fn new(violations: Vec<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            violations,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Semicolon-joined list of violations, suitable for an HTTP 400 body.
    pub fn message(&self) -> String {
        self.violations.join("; ")
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Validation Error: {} at line {} in {}",
            self.message(),
            self.line,
            self.file
        )
    }
}
