//! HTTP response bodies and the text-to-speech request.

use crate::{AmbientTheme, Character, Scene, StoryLength, StoryStyle, VoiceKind};
use serde::{Deserialize, Serialize};

/// Successful story response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Always true for a 200 response
    pub success: bool,
    /// Scenes in plan order
    pub story: Vec<Scene>,
    /// Story cast
    pub characters: Vec<Character>,
    /// Cast introduction
    pub introduction: String,
    /// Summary line
    pub message: String,
}

impl StoryResponse {
    /// Assemble a successful response with the standard summary message.
    pub fn new(story: Vec<Scene>, characters: Vec<Character>, introduction: String) -> Self {
        let message = format!(
            "Successfully generated {} scenes with {} characters",
            story.len(),
            characters.len()
        );
        Self {
            success: true,
            story,
            characters,
            introduction,
            message,
        }
    }
}

/// Text-to-speech request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to narrate
    #[serde(default)]
    pub text: Option<String>,
    /// Voice name
    #[serde(default)]
    pub voice: Option<String>,
}

/// Text-to-speech response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    /// Whether a clip was produced
    pub success: bool,
    /// URL of the clip
    pub audio_url: Option<String>,
    /// Human-readable status
    pub message: String,
}

/// Published option sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOptions {
    /// Style names
    pub styles: Vec<String>,
    /// Length names
    pub lengths: Vec<String>,
    /// Voice names
    pub voices: Vec<String>,
    /// Ambient theme names
    pub background_noises: Vec<String>,
}

impl StoryOptions {
    /// Every option set.
    pub fn all() -> Self {
        Self {
            styles: StoryStyle::names(),
            lengths: StoryLength::names(),
            voices: VoiceKind::names(),
            background_noises: AmbientTheme::names(),
        }
    }
}

/// Cleanup endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResponse {
    /// Whether the pass completed
    pub success: bool,
    /// Summary line
    pub message: String,
    /// Files removed
    pub removed: usize,
}

/// Root banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Greeting
    pub message: String,
    /// Crate version
    pub version: String,
    /// Feature list
    pub features: Vec<String>,
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub detail: String,
}
