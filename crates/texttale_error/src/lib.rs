//! Error types for the TextTale story service.
//!
//! This crate provides the foundation error types used throughout the TextTale workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use texttale_error::{TextTaleResult, ValidationError};
//!
//! fn check(length: &str) -> TextTaleResult<()> {
//!     if length != "short" {
//!         Err(ValidationError::new(vec!["Invalid length option".to_string()]))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check("extralong").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod orchestration;
mod server;
mod storage;
mod synthesis;
mod validation;

pub use config::ConfigError;
pub use error::{TextTaleError, TextTaleErrorKind, TextTaleResult};
pub use http::HttpError;
pub use orchestration::{OrchestrationError, OrchestrationErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use synthesis::{SynthesisError, SynthesisErrorKind};
pub use validation::ValidationError;
