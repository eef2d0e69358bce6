//! Artifact storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the artifact directory
    #[display("Failed to create artifact directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to list the artifact directory
    #[display("Failed to scan artifact directory: {}", _0)]
    DirectoryScan(String),
    /// Failed to write an artifact
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to delete an artifact
    #[display("Failed to delete file: {}", _0)]
    FileDelete(String),
    /// Path has no usable file name
    #[display("Invalid artifact path: {}", _0)]
    InvalidPath(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use texttale_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileDelete("/tmp/a.mp3".to_string()));
/// assert!(format!("{}", err).contains("Failed to delete"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
