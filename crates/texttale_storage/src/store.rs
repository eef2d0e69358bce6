//! Atomic artifact persistence.

use crate::naming::{ArtifactKind, artifact_file_name};
use crate::registry::ArtifactRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use texttale_error::{StorageError, StorageErrorKind, TextTaleResult};

/// A persisted and tracked clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Location on disk
    pub path: PathBuf,
    /// Public URL the server exposes it under
    pub url: String,
}

/// Writes clips into the registry's directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    registry: Arc<ArtifactRegistry>,
    public_prefix: String,
}

impl ArtifactStore {
    /// Create a store publishing files under `public_prefix`.
    pub fn new(registry: Arc<ArtifactRegistry>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into().trim_end_matches('/').to_string();
        Self {
            registry,
            public_prefix,
        }
    }

    /// Registry every persisted artifact is reported to.
    pub fn registry(&self) -> &Arc<ArtifactRegistry> {
        &self.registry
    }

    /// Write `data` as a new artifact and track it before returning.
    ///
    /// The name is reserved in the registry for the whole write, so a concurrent
    /// cleanup cannot remove the file between the rename and the tracking.
    ///
    /// # Errors
    ///
    /// Returns error if the temp file cannot be written or renamed, or if the file
    /// was removed before it could be tracked.
    #[tracing::instrument(skip(self, data), fields(kind = %kind, size = data.len()))]
    pub async fn persist(
        &self,
        kind: ArtifactKind,
        discriminator: &str,
        data: &[u8],
    ) -> TextTaleResult<StoredArtifact> {
        let name = artifact_file_name(kind, discriminator);
        let path = self.registry.directory().join(&name);

        if !self.registry.reserve(&name) {
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: name already in use",
                path.display()
            )))
            .into());
        }

        if let Err(e) = write_atomically(&path, data).await {
            self.registry.release(&name);
            return Err(e);
        }

        if !self.registry.commit(&path) {
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: removed before it could be tracked",
                path.display()
            )))
            .into());
        }

        tracing::info!(path = %path.display(), "Stored artifact");
        Ok(StoredArtifact {
            url: format!("{}/{}", self.public_prefix, name),
            path,
        })
    }
}

async fn write_atomically(path: &Path, data: &[u8]) -> TextTaleResult<()> {
    // Write to temp file first, then rename for atomicity
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
        .into());
    }
    Ok(())
}
