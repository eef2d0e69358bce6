//! OpenAI-compatible speech backend.

use crate::synthesizer::SpeechSynthesizer;
use reqwest::Client;
use std::time::Duration;
use texttale_core::{VoiceKind, VoiceProfile};
use texttale_error::{HttpError, SynthesisError, SynthesisErrorKind, TextTaleResult};
use tracing::{debug, error, instrument};

/// Client for a `/audio/speech` endpoint (OpenAI, OpenRouter, local servers).
#[derive(Debug, Clone)]
pub struct OpenAiTts {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTts {
    /// Create a client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root without trailing slash (e.g. `https://api.openai.com/v1`)
    /// * `api_key` - Bearer token
    /// * `model` - Speech model (e.g. `tts-1`)
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> TextTaleResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Provider voice for a narrator voice.
    pub fn provider_voice(voice: VoiceKind) -> &'static str {
        match voice {
            VoiceKind::Woman => "nova",
            VoiceKind::Man => "onyx",
            VoiceKind::Child => "fable",
        }
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for OpenAiTts {
    #[instrument(skip(self, text, voice), fields(chars = text.chars().count(), voice = %voice.voice))]
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyInput).into());
        }

        let url = format!("{}/audio/speech", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
            "voice": Self::provider_voice(voice.voice),
            "response_format": "mp3",
            "speed": if voice.slow { 0.85 } else { 1.0 },
        });

        debug!(url = %url, "Sending speech request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach speech endpoint");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Speech endpoint returned error");
            return Err(SynthesisError::new(SynthesisErrorKind::Backend(format!(
                "openai {}: {}",
                status, body
            )))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response: {}", e)))?;
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
