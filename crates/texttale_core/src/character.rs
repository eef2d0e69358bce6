//! Story cast members.

use serde::{Deserialize, Serialize};

/// Narrative function of a character.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CharacterRole {
    /// Main character
    Protagonist,
    /// Loyal friend of the protagonist
    Ally,
    /// Wise guide
    Mentor,
    /// Protector
    Guardian,
    /// Keeper of hidden knowledge
    Mystic,
    /// Travel companion
    Companion,
}

impl CharacterRole {
    /// Sentence describing what the role does in a story.
    pub fn description(&self) -> &'static str {
        match self {
            CharacterRole::Protagonist => "The main character who drives the story forward",
            CharacterRole::Ally => "A loyal friend who supports the protagonist",
            CharacterRole::Mentor => "A wise guide who offers knowledge and advice",
            CharacterRole::Guardian => "A protector who watches over others",
            CharacterRole::Mystic => "A mysterious figure with hidden knowledge",
            CharacterRole::Companion => "A faithful companion on the journey",
        }
    }

    /// Roles counted as allies in the story introduction.
    pub fn is_ally(&self) -> bool {
        matches!(self, CharacterRole::Ally | CharacterRole::Companion)
    }
}

/// A member of the story cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name
    pub name: String,
    /// Generated description
    pub description: String,
    /// Narrative role
    pub role: CharacterRole,
}
