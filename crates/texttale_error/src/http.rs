//! Transport failures talking to a speech backend.

/// A request to a text-to-speech service failed before a usable response arrived.
///
/// Raised by the Google and OpenAI backends for client construction, connection
/// and body-read failures. Non-success status codes are synthesis errors instead.
///
/// # Examples
///
/// ```
/// use texttale_error::HttpError;
///
/// let err = HttpError::new("connection reset by translate.google.com");
/// assert!(err.to_string().contains("connection reset"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech backend request failed: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What went wrong, as reported by the HTTP client
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl HttpError {
    /// Wrap a client failure, recording the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_the_raising_call_site() {
        let err = HttpError::new("timed out");
        assert_eq!(err.file, file!());
        assert!(err.to_string().starts_with("Speech backend request failed: timed out"));
    }
}
