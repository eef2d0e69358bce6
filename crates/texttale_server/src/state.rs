//! Shared handler state.

use crate::config::TextTaleConfig;
use std::sync::Arc;
use texttale_audio::{AmbientAdapter, SpeechAdapter, SpeechSynthesizer, build_synthesizer};
use texttale_error::TextTaleResult;
use texttale_narrative::{CharacterComposer, Orchestrator, StoryService};
use texttale_storage::{ArtifactRegistry, ArtifactStore};

/// State cloned into every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Story generation
    pub service: Arc<StoryService>,
    /// Artifact registry for the cleanup endpoint
    pub registry: Arc<ArtifactRegistry>,
}

impl AppState {
    /// Wire the configured speech backend into a ready service.
    ///
    /// # Errors
    ///
    /// Returns error if the backend or orchestrator cannot be constructed.
    pub fn from_config(
        config: &TextTaleConfig,
        registry: Arc<ArtifactRegistry>,
    ) -> TextTaleResult<Self> {
        let synthesizer = build_synthesizer(config.tts())?;
        Self::with_synthesizer(config, registry, synthesizer, CharacterComposer::new())
    }

    /// Wire an explicit synthesizer and composer.
    ///
    /// # Errors
    ///
    /// Returns error if the orchestrator settings are unusable.
    pub fn with_synthesizer(
        config: &TextTaleConfig,
        registry: Arc<ArtifactRegistry>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        composer: CharacterComposer,
    ) -> TextTaleResult<Self> {
        let store = ArtifactStore::new(Arc::clone(&registry), config.audio().public_prefix());
        let orchestrator = Orchestrator::new(
            SpeechAdapter::new(Arc::clone(&synthesizer), store.clone()),
            AmbientAdapter::new(
                synthesizer,
                store,
                *config.orchestrator().ambient_duration_secs(),
            ),
            config.orchestrator(),
        )?;
        let service = StoryService::new(composer, orchestrator, config.default_voice());
        Ok(Self {
            service: Arc::new(service),
            registry,
        })
    }
}
