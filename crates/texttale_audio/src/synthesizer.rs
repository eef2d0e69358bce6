//! Synthesis capability trait.

use texttale_core::VoiceProfile;
use texttale_error::TextTaleResult;

/// Turns text into encoded audio bytes.
///
/// Implementations must be cheap to share across tasks; the orchestrator holds one
/// behind an `Arc` and calls it from many workers at once.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` in `voice`, returning MP3 bytes.
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> TextTaleResult<Vec<u8>>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
