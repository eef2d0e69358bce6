//! Story request validation.

use crate::{AmbientTheme, StoryLength, StoryStyle};
use serde::{Deserialize, Serialize};
use texttale_error::ValidationError;

/// Maximum number of user-supplied character names.
pub const MAX_USER_CHARACTERS: usize = 3;

/// Raw story request body.
///
/// Every field is optional on the wire so that missing fields surface as
/// validation messages rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Story idea
    #[serde(default)]
    pub text: Option<String>,
    /// Style name
    #[serde(default)]
    pub style: Option<String>,
    /// Length name
    #[serde(default)]
    pub length: Option<String>,
    /// Up to three character names
    #[serde(default)]
    pub characters: Option<Vec<String>>,
    /// Ambient theme name, defaults to "none"
    #[serde(default)]
    pub background_noise: Option<String>,
}

/// A story request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryParams {
    /// Trimmed story idea
    pub prompt: String,
    /// Narrative style
    pub style: StoryStyle,
    /// Narrative length
    pub length: StoryLength,
    /// Trimmed, non-blank character names
    pub characters: Vec<String>,
    /// Ambient theme
    pub background: AmbientTheme,
}

fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl StoryRequest {
    /// Check every field, collecting all violations before failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use texttale_core::StoryRequest;
    ///
    /// let request = StoryRequest {
    ///     text: Some("A lost key".into()),
    ///     style: Some("mystery".into()),
    ///     length: Some("extralong".into()),
    ///     ..Default::default()
    /// };
    /// let err = request.validate().unwrap_err();
    /// assert!(err.message().contains("Invalid length option"));
    /// ```
    #[track_caller]
    pub fn validate(&self) -> Result<StoryParams, ValidationError> {
        let mut violations = Vec::new();

        let prompt = required(&self.text);
        if prompt.is_none() {
            violations.push("Story idea cannot be empty".to_string());
        }

        let style = match required(&self.style) {
            None => {
                violations.push("Style cannot be empty".to_string());
                None
            }
            Some(s) => match s.parse::<StoryStyle>() {
                Ok(style) => Some(style),
                Err(_) => {
                    violations.push("Invalid style option".to_string());
                    None
                }
            },
        };

        let length = match required(&self.length) {
            None => {
                violations.push("Length cannot be empty".to_string());
                None
            }
            Some(l) => match l.parse::<StoryLength>() {
                Ok(length) => Some(length),
                Err(_) => {
                    violations.push("Invalid length option".to_string());
                    None
                }
            },
        };

        let characters: Vec<String> = self
            .characters
            .iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if characters.len() > MAX_USER_CHARACTERS {
            violations.push(format!(
                "Too many characters (maximum {})",
                MAX_USER_CHARACTERS
            ));
        }

        let background = match required(&self.background_noise) {
            None => Some(AmbientTheme::None),
            Some(b) => match b.parse::<AmbientTheme>() {
                Ok(theme) => Some(theme),
                Err(_) => {
                    violations.push("Invalid background noise option".to_string());
                    None
                }
            },
        };

        match (prompt, style, length, background) {
            (Some(prompt), Some(style), Some(length), Some(background))
                if violations.is_empty() =>
            {
                Ok(StoryParams {
                    prompt: prompt.to_string(),
                    style,
                    length,
                    characters,
                    background,
                })
            }
            _ => Err(ValidationError::new(violations)),
        }
    }
}
