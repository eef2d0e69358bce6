//! Audio artifact lifecycle management for TextTale.
//!
//! Every clip the service renders is written into one shared directory. This crate
//! decides what those files are called, remembers which of them this process
//! created, and removes exactly those files again on shutdown or on request.
//!
//! # Features
//!
//! - **Startup snapshot**: files present before the process started are never deleted
//!   by automatic cleanup
//! - **Track-then-return**: an artifact is registered before its producer reports success
//! - **Atomic writes**: clips are written to a temp file and renamed into place
//! - **Idempotent cleanup**: a second pass finds nothing and reports zero
//!
//! # Example
//!
//! ```rust
//! use texttale_storage::{ArtifactKind, ArtifactRegistry, ArtifactStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ArtifactRegistry::startup("/tmp/texttale-audio")?;
//! let store = ArtifactStore::new(registry.clone(), "/static/audio");
//!
//! let artifact = store.persist(ArtifactKind::Speech, "woman", b"ID3").await?;
//! assert!(artifact.url.starts_with("/static/audio/speech_woman_"));
//!
//! let report = registry.cleanup_generated();
//! assert_eq!(report.removed, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lifecycle;
mod naming;
mod registry;
mod store;

pub use lifecycle::{CleanupGuard, shutdown_signal};
pub use naming::{ARTIFACT_EXTENSION, ArtifactKind, artifact_file_name, is_artifact, is_generated_name};
pub use registry::{ArtifactRegistry, CleanupFailure, CleanupReport};
pub use store::{ArtifactStore, StoredArtifact};
pub use texttale_error::{StorageError, StorageErrorKind};
