//! Enumerated option sets published by the story-options endpoint.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Narrative genre of a story.
///
/// # Examples
///
/// ```
/// use texttale_core::StoryStyle;
///
/// let style: StoryStyle = "sci-fi".parse().unwrap();
/// assert_eq!(style, StoryStyle::SciFi);
/// assert_eq!(style.to_string(), "sci-fi");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StoryStyle {
    /// Fantasy
    Fantasy,
    /// Science fiction
    SciFi,
    /// Mystery
    Mystery,
    /// Romance
    Romance,
    /// Adventure
    Adventure,
    /// Horror
    Horror,
    /// Comedy
    Comedy,
    /// Drama
    Drama,
}

impl StoryStyle {
    /// Wire names of every style, in publication order.
    pub fn names() -> Vec<String> {
        Self::iter().map(|s| s.to_string()).collect()
    }
}

/// How many narrative beats a story spans.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryLength {
    /// Seven scenes
    Short,
    /// Eleven scenes
    Medium,
    /// Seventeen scenes
    Long,
}

impl StoryLength {
    /// Wire names of every length, in publication order.
    pub fn names() -> Vec<String> {
        Self::iter().map(|l| l.to_string()).collect()
    }
}

/// Named narrator voice.
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
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceKind {
    /// Clear American English
    #[default]
    Woman,
    /// Australian English, deeper register
    Man,
    /// British English, slowed down
    Child,
}

impl VoiceKind {
    /// Wire names of every voice, in publication order.
    pub fn names() -> Vec<String> {
        Self::iter().map(|v| v.to_string()).collect()
    }

    /// Parse a voice name, falling back to the default voice for unknown names.
    pub fn parse_or_default(name: Option<&str>) -> Self {
        name.and_then(|n| n.trim().parse().ok()).unwrap_or_default()
    }

    /// Synthesis parameters for this voice.
    pub fn profile(&self) -> VoiceProfile {
        match self {
            VoiceKind::Woman => VoiceProfile {
                voice: *self,
                language: "en",
                tld: "com",
                slow: false,
            },
            VoiceKind::Man => VoiceProfile {
                voice: *self,
                language: "en",
                tld: "com.au",
                slow: false,
            },
            VoiceKind::Child => VoiceProfile {
                voice: *self,
                language: "en",
                tld: "co.uk",
                slow: true,
            },
        }
    }
}

/// Parameters a synthesis backend needs to render a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceProfile {
    /// Voice this profile renders
    pub voice: VoiceKind,
    /// Language code (e.g. "en")
    pub language: &'static str,
    /// Regional top-level domain selecting the accent (e.g. "com.au")
    pub tld: &'static str,
    /// Slowed-down speech
    pub slow: bool,
}

/// Ambient background theme layered under each scene.
///
/// # Examples
///
/// ```
/// use texttale_core::AmbientTheme;
///
/// assert!(AmbientTheme::None.is_silent());
/// assert_eq!("rain".parse::<AmbientTheme>().unwrap(), AmbientTheme::Rain);
/// ```
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
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AmbientTheme {
    /// Birds and wind
    Forest,
    /// Urban bustle
    City,
    /// Waves and gulls
    Ocean,
    /// Rainfall and distant thunder
    Rain,
    /// Crackling fire
    Fireplace,
    /// Quiet reading room
    Library,
    /// No background audio
    #[default]
    None,
}

impl AmbientTheme {
    /// Wire names of every theme, in publication order.
    pub fn names() -> Vec<String> {
        Self::iter().map(|t| t.to_string()).collect()
    }

    /// Whether this theme produces no audio at all.
    pub fn is_silent(&self) -> bool {
        matches!(self, AmbientTheme::None)
    }

    /// Short human description of the soundscape.
    pub fn description(&self) -> &'static str {
        match self {
            AmbientTheme::Forest => "Peaceful forest sounds with birds and wind",
            AmbientTheme::City => "Urban ambient sounds",
            AmbientTheme::Ocean => "Calming ocean waves",
            AmbientTheme::Rain => "Gentle rain sounds",
            AmbientTheme::Fireplace => "Cozy fireplace ambiance",
            AmbientTheme::Library => "Quiet library atmosphere",
            AmbientTheme::None => "No background noise",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_names_match_published_sets() {
        assert_eq!(
            StoryStyle::names(),
            vec![
                "fantasy",
                "sci-fi",
                "mystery",
                "romance",
                "adventure",
                "horror",
                "comedy",
                "drama"
            ]
        );
        assert_eq!(StoryLength::names(), vec!["short", "medium", "long"]);
        assert_eq!(VoiceKind::names(), vec!["woman", "man", "child"]);
        assert_eq!(AmbientTheme::names().last().map(String::as_str), Some("none"));
    }

    #[test]
    fn unknown_voice_falls_back_to_woman() {
        assert_eq!(VoiceKind::parse_or_default(Some("robot")), VoiceKind::Woman);
        assert_eq!(VoiceKind::parse_or_default(None), VoiceKind::Woman);
        assert_eq!(VoiceKind::parse_or_default(Some(" man ")), VoiceKind::Man);
    }

    #[test]
    fn child_voice_is_slow() {
        let profile = VoiceKind::Child.profile();
        assert!(profile.slow);
        assert_eq!(profile.tld, "co.uk");
    }
}
