//! Google Translate speech backend.
//!
//! Speaks the `batchexecute` RPC used by the Translate web UI. Text is sent in
//! chunks of at most [`GOOGLE_MAX_CHARS`] characters and the returned MP3 frames
//! are concatenated.

use crate::chunk::split_text;
use crate::synthesizer::SpeechSynthesizer;
use base64::Engine;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use texttale_core::VoiceProfile;
use texttale_error::{HttpError, SynthesisError, SynthesisErrorKind, TextTaleResult};
use tracing::{debug, error, instrument};

/// Longest chunk the endpoint accepts.
pub const GOOGLE_MAX_CHARS: usize = 100;

const RPC_ID: &str = "jQ1olc";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

/// Google Translate text-to-speech client.
#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: Client,
    audio_pattern: Regex,
}

impl GoogleTts {
    /// Create a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> TextTaleResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        let audio_pattern = Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).map_err(|e| {
            SynthesisError::new(SynthesisErrorKind::Backend(format!(
                "invalid response pattern: {}",
                e
            )))
        })?;
        Ok(Self {
            client,
            audio_pattern,
        })
    }

    fn endpoint(voice: &VoiceProfile) -> String {
        format!(
            "https://translate.google.{}/_/TranslateWebserverUi/data/batchexecute",
            voice.tld
        )
    }

    /// Encode one chunk as the `f.req` form value.
    pub(crate) fn rpc_payload(text: &str, voice: &VoiceProfile) -> String {
        let speed = if voice.slow {
            serde_json::Value::Bool(true)
        } else {
            serde_json::Value::Null
        };
        let parameter = serde_json::json!([text, voice.language, speed, "null"]).to_string();
        serde_json::json!([[[RPC_ID, parameter, null, "generic"]]]).to_string()
    }

    /// Pull the base64 audio out of a batchexecute response body.
    pub(crate) fn decode_audio(&self, body: &str) -> TextTaleResult<Vec<u8>> {
        let mut audio = Vec::new();
        for line in body.lines().filter(|line| line.contains(RPC_ID)) {
            if let Some(captures) = self.audio_pattern.captures(line) {
                let encoded = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| {
                        SynthesisError::new(SynthesisErrorKind::MalformedResponse(format!(
                            "invalid base64 audio: {}",
                            e
                        )))
                    })?;
                audio.extend(decoded);
            }
        }
        if audio.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::MalformedResponse(
                "no audio stream in response".to_string(),
            ))
            .into());
        }
        Ok(audio)
    }

    #[instrument(skip(self, text, voice), fields(chars = text.chars().count(), tld = voice.tld))]
    async fn synthesize_chunk(&self, text: &str, voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        let response = self
            .client
            .post(Self::endpoint(voice))
            .header("Referer", "http://translate.google.com/")
            .form(&[("f.req", Self::rpc_payload(text, voice))])
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach Google TTS");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Google TTS returned error");
            return Err(SynthesisError::new(SynthesisErrorKind::Backend(format!(
                "google {}: {}",
                status, body
            )))
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response: {}", e)))?;
        self.decode_audio(&body)
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        let chunks = split_text(text, GOOGLE_MAX_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::EmptyInput).into());
        }

        debug!(chunks = chunks.len(), voice = %voice.voice, "Synthesizing with Google TTS");
        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk, voice).await?);
        }
        Ok(audio)
    }

    fn name(&self) -> &str {
        "google"
    }
}
