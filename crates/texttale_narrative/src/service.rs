//! Story generation entry point used by the HTTP layer.

use crate::composer::CharacterComposer;
use crate::orchestrator::Orchestrator;
use crate::planner::ScenePlanner;
use texttale_core::{StoryParams, StoryResponse, VoiceKind};
use texttale_error::TextTaleResult;
use texttale_storage::StoredArtifact;

/// Plans, casts and voices a story.
#[derive(Debug)]
pub struct StoryService {
    planner: ScenePlanner,
    composer: CharacterComposer,
    orchestrator: Orchestrator,
    narrator: VoiceKind,
}

impl StoryService {
    /// Create a service narrating stories in `narrator`.
    pub fn new(composer: CharacterComposer, orchestrator: Orchestrator, narrator: VoiceKind) -> Self {
        Self {
            planner: ScenePlanner::new(),
            composer,
            orchestrator,
            narrator,
        }
    }

    /// Orchestrator driving synthesis.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Voice used for story narration and as the speech fallback.
    pub fn narrator(&self) -> VoiceKind {
        self.narrator
    }

    /// Generate a complete story.
    ///
    /// Planning and casting run first and synchronously; audio is then fanned out.
    /// Audio failures only blank the affected URLs.
    ///
    /// # Errors
    ///
    /// Returns an orchestration error if the worker pool is unavailable.
    #[tracing::instrument(skip(self, params), fields(style = %params.style, length = %params.length, theme = %params.background))]
    pub async fn generate(&self, params: &StoryParams) -> TextTaleResult<StoryResponse> {
        let plan = self
            .planner
            .plan(&params.prompt, params.style, params.length);
        let cast = self
            .composer
            .compose(&params.prompt, params.style, &params.characters);

        let story = self
            .orchestrator
            .assemble_story(&plan, self.narrator, params.background)
            .await?;

        let response = StoryResponse::new(story, cast.characters, cast.introduction);
        tracing::info!(message = %response.message, "Story generated");
        Ok(response)
    }

    /// Narrate free text, returning the artifact or `None` on any failure.
    ///
    /// Bounded by the same budget as story tasks; a late clip is still tracked.
    #[tracing::instrument(skip(self, text), fields(voice = %voice))]
    pub async fn speak(&self, text: &str, voice: VoiceKind) -> Option<StoredArtifact> {
        let speech = self.orchestrator.speech().clone();
        let text = text.to_string();
        let work = tokio::spawn(async move { speech.render(&text, voice).await });

        match tokio::time::timeout(self.orchestrator.budget(), work).await {
            Ok(Ok(Ok(artifact))) => Some(artifact),
            Ok(Ok(Err(e))) => {
                tracing::warn!(error = %e, "Speech synthesis failed");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Speech task panicked");
                None
            }
            Err(_) => {
                tracing::warn!("Speech synthesis timed out");
                None
            }
        }
    }
}
