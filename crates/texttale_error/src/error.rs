//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, OrchestrationError, ServerError, StorageError, SynthesisError,
    ValidationError,
};

/// Every error condition a TextTale crate can report.
///
/// # Examples
///
/// ```
/// use texttale_error::{TextTaleError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: TextTaleError = http_err.into();
/// assert!(format!("{}", err).contains("Speech backend request failed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TextTaleErrorKind {
    /// Request failed validation
    #[from(ValidationError)]
    Validation(ValidationError),
    /// A single speech or ambient synthesis failed
    #[from(SynthesisError)]
    Synthesis(SynthesisError),
    /// The fan-out machinery itself failed
    #[from(OrchestrationError)]
    Orchestration(OrchestrationError),
    /// Artifact storage or cleanup error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// TextTale error with kind discrimination.
///
/// # Examples
///
/// ```
/// use texttale_error::{TextTaleErrorKind, TextTaleResult, ConfigError};
///
/// fn might_fail() -> TextTaleResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), TextTaleErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("TextTale Error: {}", _0)]
pub struct TextTaleError(Box<TextTaleErrorKind>);

impl TextTaleError {
    /// Create a new error from a kind.
    pub fn new(kind: TextTaleErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TextTaleErrorKind {
        &self.0
    }

    /// Whether this error came from request validation.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), TextTaleErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to TextTaleErrorKind
impl<T> From<T> for TextTaleError
where
    T: Into<TextTaleErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for TextTale operations.
pub type TextTaleResult<T> = std::result::Result<T, TextTaleError>;
