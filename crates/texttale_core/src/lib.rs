//! Core data types for the TextTale story service.
//!
//! This crate provides the option sets (styles, lengths, voices, ambient themes),
//! the story pipeline records (`SceneDraft`, `StoryPlan`, `Scene`) and the
//! wire types exchanged over HTTP.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod character;
mod options;
mod request;
mod scene;
mod synthesis;

pub use api::{
    CleanupResponse, ErrorBody, ServiceInfo, SpeechRequest, SpeechResponse, StoryOptions,
    StoryResponse,
};
pub use character::{Character, CharacterRole};
pub use options::{AmbientTheme, StoryLength, StoryStyle, VoiceKind, VoiceProfile};
pub use request::{MAX_USER_CHARACTERS, StoryParams, StoryRequest};
pub use scene::{Scene, SceneDraft, StoryPlan};
pub use synthesis::{SynthesisKind, SynthesisResult, SynthesisTask};
