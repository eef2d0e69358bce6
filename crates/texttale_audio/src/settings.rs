//! Backend selection.

use crate::google::GoogleTts;
use crate::openai::OpenAiTts;
use crate::synthesizer::SpeechSynthesizer;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use texttale_error::{ConfigError, TextTaleResult};

/// Available speech backends.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TtsBackendKind {
    /// Google Translate speech
    #[default]
    Google,
    /// OpenAI-compatible `/audio/speech`
    OpenAi,
}

/// The `[tts]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct TtsSettings {
    /// Which backend to use
    #[serde(default)]
    backend: TtsBackendKind,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    request_timeout_secs: u64,
    /// OpenAI-compatible API root
    #[serde(default)]
    base_url: Option<String>,
    /// OpenAI-compatible API key
    #[serde(default)]
    api_key: Option<String>,
    /// OpenAI-compatible speech model
    #[serde(default)]
    model: Option<String>,
}

fn default_request_timeout() -> u64 {
    20
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            backend: TtsBackendKind::Google,
            request_timeout_secs: default_request_timeout(),
            base_url: None,
            api_key: None,
            model: None,
        }
    }
}

impl TtsSettings {
    /// Create a builder.
    pub fn builder() -> TtsSettingsBuilder {
        TtsSettingsBuilder::default()
    }
}

/// Construct the configured backend.
///
/// # Errors
///
/// Returns a configuration error if the openai backend is selected without an API
/// key, or if the HTTP client cannot be built.
#[tracing::instrument(skip(settings), fields(backend = %settings.backend()))]
pub fn build_synthesizer(settings: &TtsSettings) -> TextTaleResult<Arc<dyn SpeechSynthesizer>> {
    let timeout = Duration::from_secs(*settings.request_timeout_secs());
    let synthesizer: Arc<dyn SpeechSynthesizer> = match settings.backend() {
        TtsBackendKind::Google => Arc::new(GoogleTts::new(timeout)?),
        TtsBackendKind::OpenAi => {
            let api_key = settings
                .api_key()
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| ConfigError::new("tts.api_key is required for the openai backend"))?;
            let base_url = settings
                .base_url()
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
            let model = settings.model().clone().unwrap_or_else(|| "tts-1".to_string());
            Arc::new(OpenAiTts::new(base_url, api_key, model, timeout)?)
        }
    };
    tracing::info!(backend = synthesizer.name(), "Speech backend ready");
    Ok(synthesizer)
}
