//! Process-wide record of generated audio artifacts.

use crate::naming::{is_artifact, is_generated_name};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use texttale_error::{StorageError, StorageErrorKind, TextTaleResult};

/// A file that could not be removed during cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// File that survived
    pub path: PathBuf,
    /// Why it survived
    pub reason: String,
}

/// Outcome of a cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files actually deleted
    pub removed: usize,
    /// Per-file deletion failures
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    fn delete(&mut self, path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed artifact");
                self.removed += 1;
            }
            // Already gone: someone else cleaned it up.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let err = StorageError::new(StorageErrorKind::FileDelete(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
                tracing::warn!(path = %path.display(), error = %err, "Failed to remove artifact");
                self.failures.push(CleanupFailure {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

#[derive(Debug, Default)]
struct Ledger {
    generated: HashSet<PathBuf>,
    /// File stems of writes between reservation and commit
    pending: HashSet<String>,
}

/// Tracks which artifacts this process created.
///
/// The directory is snapshotted once, when the registry is constructed. Files in
/// that snapshot are pre-existing and automatic cleanup never touches them; any
/// other artifact in the directory was produced by this process.
///
/// Writers reserve a name before touching the disk and commit it once the file is
/// in place. Cleanup runs under the same lock and skips reserved names, so it never
/// sees a file that is on disk but not yet tracked.
///
/// The registry is shared by reference (`Arc`) with every producer of artifacts;
/// there is no global instance.
#[derive(Debug)]
pub struct ArtifactRegistry {
    directory: PathBuf,
    preexisting: HashSet<String>,
    ledger: Mutex<Ledger>,
}

impl ArtifactRegistry {
    /// Create the artifact directory if needed and snapshot its contents.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or listed.
    #[tracing::instrument(skip_all)]
    pub fn startup(directory: impl Into<PathBuf>) -> TextTaleResult<Arc<Self>> {
        let directory = directory.into();

        std::fs::create_dir_all(&directory).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                directory.display(),
                e
            )))
        })?;

        let preexisting: HashSet<String> = list_files(&directory)?
            .into_iter()
            .filter_map(|path| file_name(&path))
            .filter(|name| is_artifact(name) || is_generated_name(name))
            .collect();

        tracing::info!(
            directory = %directory.display(),
            preexisting = preexisting.len(),
            "Snapshotted artifact directory"
        );

        Ok(Arc::new(Self {
            directory,
            preexisting,
            ledger: Mutex::new(Ledger::default()),
        }))
    }

    /// Directory artifacts are written to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether `path` was present when the registry started.
    pub fn is_preexisting(&self, path: &Path) -> bool {
        path.parent() == Some(self.directory.as_path())
            && file_name(path).is_some_and(|name| self.preexisting.contains(&name))
    }

    /// Number of artifacts currently eligible for cleanup.
    pub fn generated_count(&self) -> usize {
        self.ledger.lock().generated.len()
    }

    /// Record `path` as generated by this process.
    ///
    /// Returns `true` if the path was newly added. Files that do not exist or that
    /// were present at startup are ignored. Safe to call from many tasks at once.
    pub fn track(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let mut ledger = self.ledger.lock();
        self.insert_generated(&mut ledger, path)
    }

    /// Claim `file_name` for a write that is about to start.
    ///
    /// Cleanup leaves the name alone, along with its `.tmp` sibling, until
    /// [`commit`](Self::commit) or [`release`](Self::release). Returns `false` if the
    /// name is already reserved or was present at startup.
    pub fn reserve(&self, file_name: &str) -> bool {
        if self.preexisting.contains(file_name) {
            return false;
        }
        self.ledger.lock().pending.insert(stem(file_name).to_string())
    }

    /// Finish a reserved write: drop the reservation and track `path`.
    ///
    /// Returns `false` if the file is no longer on disk, in which case nothing is
    /// tracked and the caller must not hand the artifact out.
    pub fn commit(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let mut ledger = self.ledger.lock();
        if let Some(name) = file_name(path) {
            ledger.pending.remove(stem(&name));
        }
        self.insert_generated(&mut ledger, path) || ledger.generated.contains(path)
    }

    /// Drop a reservation whose write failed.
    pub fn release(&self, file_name: &str) {
        self.ledger.lock().pending.remove(stem(file_name));
    }

    fn insert_generated(&self, ledger: &mut Ledger, path: &Path) -> bool {
        if !path.exists() || self.is_preexisting(path) {
            tracing::debug!(path = %path.display(), "Not tracking artifact");
            return false;
        }
        let added = ledger.generated.insert(path.to_path_buf());
        if added {
            tracing::debug!(path = %path.display(), "Tracking artifact");
        }
        added
    }

    /// Delete every artifact this process generated.
    ///
    /// Tracked files go first; then the directory is scanned for files that follow
    /// the generated naming pattern but were never tracked. Pre-existing files are
    /// never removed, and neither are files of writes still in progress. Deletion
    /// failures are recorded and the pass continues.
    #[tracing::instrument(skip(self), fields(directory = %self.directory.display()))]
    pub fn cleanup_generated(&self) -> CleanupReport {
        let mut ledger = self.ledger.lock();
        let tracked: Vec<PathBuf> = ledger.generated.drain().collect();
        let mut report = CleanupReport::default();

        for path in &tracked {
            report.delete(path);
        }

        match list_files(&self.directory) {
            Ok(paths) => {
                for path in paths {
                    let Some(name) = file_name(&path) else {
                        continue;
                    };
                    if is_generated_name(&name)
                        && !self.preexisting.contains(&name)
                        && !ledger.pending.contains(stem(&name))
                    {
                        report.delete(&path);
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "Skipping straggler scan"),
        }

        tracing::info!(
            removed = report.removed,
            failures = report.failures.len(),
            "Cleaned up generated artifacts"
        );
        report
    }

    /// Delete every artifact in the directory, pre-existing ones included.
    ///
    /// Operator action only; never called automatically.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be listed.
    #[tracing::instrument(skip(self), fields(directory = %self.directory.display()))]
    pub fn cleanup_all(&self) -> TextTaleResult<CleanupReport> {
        let mut ledger = self.ledger.lock();
        let mut report = CleanupReport::default();
        for path in list_files(&self.directory)? {
            if file_name(&path).is_some_and(|name| is_artifact(&name)) {
                report.delete(&path);
            }
        }
        ledger.generated.clear();

        tracing::warn!(
            removed = report.removed,
            failures = report.failures.len(),
            "Removed all artifacts"
        );
        Ok(report)
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn stem(file_name: &str) -> &str {
    file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem)
}

fn list_files(directory: &Path) -> TextTaleResult<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StorageError::new(StorageErrorKind::DirectoryScan(format!(
                "{}: {}",
                directory.display(),
                e
            )))
            .into());
        }
    };

    Ok(entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.path())
        .collect())
}
