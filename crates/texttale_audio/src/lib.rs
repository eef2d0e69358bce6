//! Speech synthesis for TextTale.
//!
//! The [`SpeechSynthesizer`] trait is the only thing the rest of the workspace knows
//! about text-to-speech. Two network backends implement it; the adapters on top turn
//! synthesized bytes into tracked artifacts with public URLs.
//!
//! # Backends
//!
//! - [`GoogleTts`] - Google Translate speech endpoint (no key required)
//! - [`OpenAiTts`] - any OpenAI-compatible `/audio/speech` endpoint
//!
//! Use [`build_synthesizer`] to pick one from [`TtsSettings`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod chunk;
mod google;
mod openai;
mod settings;
mod synthesizer;

pub use adapter::{AmbientAdapter, SpeechAdapter, ambient_script};
pub use chunk::split_text;
pub use google::{GOOGLE_MAX_CHARS, GoogleTts};
pub use openai::OpenAiTts;
pub use settings::{TtsBackendKind, TtsSettings, TtsSettingsBuilder, build_synthesizer};
pub use synthesizer::SpeechSynthesizer;
