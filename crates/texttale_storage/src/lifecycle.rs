//! Shutdown hooks that run the generated-artifact cleanup.

use crate::registry::ArtifactRegistry;
use std::sync::Arc;

/// Runs [`ArtifactRegistry::cleanup_generated`] when dropped.
///
/// Hold one in `main` so cleanup also happens when the process returns early or
/// unwinds. Running after an explicit cleanup is a no-op.
#[derive(Debug)]
pub struct CleanupGuard {
    registry: Arc<ArtifactRegistry>,
}

impl CleanupGuard {
    /// Guard `registry` until drop.
    pub fn new(registry: Arc<ArtifactRegistry>) -> Self {
        Self { registry }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let report = self.registry.cleanup_generated();
        tracing::info!(removed = report.removed, "Exit cleanup finished");
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
///
/// If a handler cannot be installed the failure is logged and that branch never
/// resolves, so the other one still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn guard_cleans_on_drop() {
        let dir = TempDir::new().unwrap();
        let registry = ArtifactRegistry::startup(dir.path()).unwrap();
        let path = dir.path().join("background_rain_1_00000000.mp3");
        std::fs::write(&path, b"x").unwrap();
        registry.track(&path);

        drop(CleanupGuard::new(registry.clone()));

        assert!(!path.exists());
        assert_eq!(registry.generated_count(), 0);
    }
}
