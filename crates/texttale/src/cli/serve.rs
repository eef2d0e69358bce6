//! The `serve` command.

use std::sync::Arc;
use texttale_error::TextTaleResult;
use texttale_server::{AppState, TextTaleConfig, router, serve};
use texttale_storage::{ArtifactRegistry, CleanupGuard, shutdown_signal};
use tracing::info;

/// Run the API until Ctrl-C or SIGTERM, then remove generated audio.
///
/// The artifact directory is snapshotted before anything can write to it. A drop
/// guard repeats the cleanup if this function exits early; after the explicit
/// pass below it finds nothing left to delete.
pub async fn run_server(config: &TextTaleConfig) -> TextTaleResult<()> {
    let registry = ArtifactRegistry::startup(config.audio().directory())?;
    let _guard = CleanupGuard::new(Arc::clone(&registry));

    let state = AppState::from_config(config, Arc::clone(&registry))?;
    let app = router(state.clone(), config);

    info!(
        directory = %registry.directory().display(),
        "Audio cleanup enabled, generated files will be removed on exit"
    );
    serve(config, app, shutdown_signal()).await?;

    state.service.orchestrator().close();
    let report = registry.cleanup_generated();
    info!(
        removed = report.removed,
        failures = report.failures.len(),
        "Shutdown cleanup complete"
    );
    Ok(())
}
