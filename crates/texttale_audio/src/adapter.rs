//! Adapters that turn synthesized audio into tracked artifacts.

use crate::synthesizer::SpeechSynthesizer;
use std::sync::Arc;
use texttale_core::{AmbientTheme, VoiceKind};
use texttale_error::{SynthesisError, SynthesisErrorKind, TextTaleResult};
use texttale_storage::{ArtifactKind, ArtifactStore, StoredArtifact};

/// Narrates scene text into a speech artifact.
#[derive(Clone)]
pub struct SpeechAdapter {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: ArtifactStore,
}

impl SpeechAdapter {
    /// Create an adapter writing through `store`.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, store: ArtifactStore) -> Self {
        Self { synthesizer, store }
    }

    /// Synthesize `text` in `voice` and persist it.
    ///
    /// The artifact is tracked by the registry before this returns.
    ///
    /// # Errors
    ///
    /// Returns error on empty input, backend failure, empty audio, or a failed write.
    #[tracing::instrument(skip(self, text), fields(voice = %voice, backend = self.synthesizer.name()))]
    pub async fn render(&self, text: &str, voice: VoiceKind) -> TextTaleResult<StoredArtifact> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyInput).into());
        }

        let audio = self.synthesizer.synthesize(text, &voice.profile()).await?;
        if audio.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyAudio(
                self.synthesizer.name().to_string(),
            ))
            .into());
        }

        self.store
            .persist(ArtifactKind::Speech, voice.as_ref(), &audio)
            .await
    }
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("synthesizer", &self.synthesizer.name())
            .field("store", &self.store)
            .finish()
    }
}

/// Text spoken to represent an ambient theme.
///
/// # Examples
///
/// ```
/// use texttale_audio::ambient_script;
/// use texttale_core::AmbientTheme;
///
/// assert_eq!(
///     ambient_script(AmbientTheme::Rain, 30),
///     "Ambient Gentle rain sounds sounds playing softly in the background for 30 seconds"
/// );
/// ```
pub fn ambient_script(theme: AmbientTheme, duration_secs: u64) -> String {
    format!(
        "Ambient {} sounds playing softly in the background for {} seconds",
        theme.description(),
        duration_secs
    )
}

/// Renders the clip for an ambient theme.
#[derive(Clone)]
pub struct AmbientAdapter {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: ArtifactStore,
    duration_secs: u64,
}

impl AmbientAdapter {
    /// Create an adapter announcing clips of `duration_secs`.
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: ArtifactStore,
        duration_secs: u64,
    ) -> Self {
        Self {
            synthesizer,
            store,
            duration_secs,
        }
    }

    /// Render `theme`, or return `None` for the silent theme without touching disk.
    ///
    /// # Errors
    ///
    /// Returns error on backend failure, empty audio, or a failed write.
    #[tracing::instrument(skip(self), fields(theme = %theme))]
    pub async fn render(&self, theme: AmbientTheme) -> TextTaleResult<Option<StoredArtifact>> {
        if theme.is_silent() {
            return Ok(None);
        }

        let script = ambient_script(theme, self.duration_secs);
        let audio = self
            .synthesizer
            .synthesize(&script, &VoiceKind::default().profile())
            .await?;
        if audio.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyAudio(
                self.synthesizer.name().to_string(),
            ))
            .into());
        }

        let artifact = self
            .store
            .persist(ArtifactKind::Background, theme.as_ref(), &audio)
            .await?;
        Ok(Some(artifact))
    }
}

impl std::fmt::Debug for AmbientAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientAdapter")
            .field("synthesizer", &self.synthesizer.name())
            .field("duration_secs", &self.duration_secs)
            .finish()
    }
}
