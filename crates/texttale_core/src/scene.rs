//! Scene records flowing through the story pipeline.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One planned scene before any audio exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDraft {
    /// Rendered prose for the scene
    pub text: String,
    /// Stable ordering key for the whole pipeline
    pub index: usize,
}

/// Ordered, immutable sequence of scene drafts.
///
/// # Examples
///
/// ```
/// use texttale_core::StoryPlan;
///
/// let plan = StoryPlan::from_texts(vec!["Once.".into(), "Then.".into()]);
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.scenes()[1].index, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct StoryPlan {
    scenes: Vec<SceneDraft>,
}

impl StoryPlan {
    /// Build a plan, assigning indices in iteration order.
    pub fn from_texts(texts: impl IntoIterator<Item = String>) -> Self {
        let scenes = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| SceneDraft { text, index })
            .collect();
        Self { scenes }
    }

    /// Number of planned scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the plan contains no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Iterate scenes in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneDraft> {
        self.scenes.iter()
    }
}

/// Final scene returned to clients.
///
/// Both URL fields are always present; an empty string means no audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene prose
    pub text: String,
    /// Narration clip URL, or empty
    pub audio_url: String,
    /// Ambient clip URL, or empty
    pub background_noise_url: String,
}

impl Scene {
    /// A scene with text only.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            audio_url: String::new(),
            background_noise_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_serializes_camel_case_urls() {
        let scene = Scene::text_only("The door creaked.");
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["audioUrl"], "");
        assert_eq!(json["backgroundNoiseUrl"], "");
        assert_eq!(json["text"], "The door creaked.");
    }

    #[test]
    fn plan_indices_follow_input_order() {
        let plan = StoryPlan::from_texts(["a", "b", "c"].map(String::from));
        let indices: Vec<_> = plan.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
