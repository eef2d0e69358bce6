//! Artifact file naming convention.
//!
//! `{kind}_{discriminator}_{timestamp_micros}_{nonce}.mp3`
//!
//! The kind prefix is what the cleanup scan keys on, so every generated file must
//! start with one of the [`ArtifactKind`] prefixes.

use uuid::Uuid;

/// File extension of every audio artifact.
pub const ARTIFACT_EXTENSION: &str = "mp3";

/// Artifact category, encoded as the file name prefix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactKind {
    /// Scene narration
    Speech,
    /// Ambient background clip
    Background,
}

impl ArtifactKind {
    fn prefix(&self) -> String {
        format!("{}_", self.as_ref())
    }
}

/// Build a collision-free artifact file name.
///
/// The microsecond timestamp orders files; the random nonce separates concurrent
/// writers that land on the same microsecond.
///
/// # Examples
///
/// ```
/// use texttale_storage::{ArtifactKind, artifact_file_name, is_generated_name};
///
/// let name = artifact_file_name(ArtifactKind::Background, "rain");
/// assert!(name.starts_with("background_rain_"));
/// assert!(is_generated_name(&name));
/// ```
pub fn artifact_file_name(kind: ArtifactKind, discriminator: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_micros();
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}_{}.{}",
        kind,
        sanitize(discriminator),
        timestamp,
        &nonce[..8],
        ARTIFACT_EXTENSION
    )
}

fn sanitize(discriminator: &str) -> String {
    let cleaned: String = discriminator
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

/// Whether `file_name` is any audio artifact.
pub fn is_artifact(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext == ARTIFACT_EXTENSION)
}

/// Whether `file_name` follows the generated-artifact pattern.
///
/// Matches finished clips and the temp files left behind by interrupted writes.
pub fn is_generated_name(file_name: &str) -> bool {
    let has_prefix = [ArtifactKind::Speech, ArtifactKind::Background]
        .iter()
        .any(|kind| file_name.starts_with(&kind.prefix()));
    has_prefix && (is_artifact(file_name) || file_name.ends_with(".tmp"))
}
