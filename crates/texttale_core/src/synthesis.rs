//! Per-scene synthesis work items and their outcomes.

use crate::{AmbientTheme, VoiceKind};
use serde::{Deserialize, Serialize};

/// Which audio track a task produces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SynthesisKind {
    /// Narration of the scene text
    Speech,
    /// Background soundscape
    Ambient,
}

/// One unit of fan-out work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisTask {
    /// Narrate `text` with `voice`.
    Speech {
        /// Scene this task belongs to
        scene_index: usize,
        /// Text to narrate
        text: String,
        /// Narrator voice
        voice: VoiceKind,
    },
    /// Render the ambient clip for `theme`.
    Ambient {
        /// Scene this task belongs to
        scene_index: usize,
        /// Theme shared across every scene of the request
        theme: AmbientTheme,
    },
}

impl SynthesisTask {
    /// Scene this task belongs to.
    pub fn scene_index(&self) -> usize {
        match self {
            SynthesisTask::Speech { scene_index, .. }
            | SynthesisTask::Ambient { scene_index, .. } => *scene_index,
        }
    }

    /// Track this task produces.
    pub fn kind(&self) -> SynthesisKind {
        match self {
            SynthesisTask::Speech { .. } => SynthesisKind::Speech,
            SynthesisTask::Ambient { .. } => SynthesisKind::Ambient,
        }
    }
}

/// Outcome of one task.
///
/// `artifact_url` is `None` exactly when the task failed or had nothing to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// Scene this result belongs to
    pub scene_index: usize,
    /// Track this result fills
    pub kind: SynthesisKind,
    /// Public URL of the produced clip
    pub artifact_url: Option<String>,
    /// Whether the task failed or timed out
    pub failed: bool,
}

impl SynthesisResult {
    /// Successful task with a persisted clip.
    pub fn succeeded(scene_index: usize, kind: SynthesisKind, url: impl Into<String>) -> Self {
        Self {
            scene_index,
            kind,
            artifact_url: Some(url.into()),
            failed: false,
        }
    }

    /// Failed or timed-out task.
    pub fn failed(scene_index: usize, kind: SynthesisKind) -> Self {
        Self {
            scene_index,
            kind,
            artifact_url: None,
            failed: true,
        }
    }

    /// Valid result with nothing to render (silent ambient theme).
    pub fn empty(scene_index: usize, kind: SynthesisKind) -> Self {
        Self {
            scene_index,
            kind,
            artifact_url: None,
            failed: false,
        }
    }

    /// URL or the empty string.
    pub fn url_or_empty(&self) -> String {
        self.artifact_url.clone().unwrap_or_default()
    }
}
