//! Tests for the speech and ambient adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use texttale_audio::{AmbientAdapter, SpeechAdapter, SpeechSynthesizer};
use texttale_core::{AmbientTheme, VoiceKind, VoiceProfile};
use texttale_error::{SynthesisError, SynthesisErrorKind, TextTaleResult};
use texttale_storage::{ArtifactRegistry, ArtifactStore};

/// Echoes the text back as audio and records what it was asked.
#[derive(Default)]
struct EchoSynth {
    calls: AtomicUsize,
    last_slow: std::sync::Mutex<Option<bool>>,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for EchoSynth {
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_slow.lock().unwrap() = Some(voice.slow);
        Ok(text.as_bytes().to_vec())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

struct SilentSynth;

#[async_trait::async_trait]
impl SpeechSynthesizer for SilentSynth {
    async fn synthesize(&self, _text: &str, _voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

struct BrokenSynth;

#[async_trait::async_trait]
impl SpeechSynthesizer for BrokenSynth {
    async fn synthesize(&self, _text: &str, _voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        Err(SynthesisError::new(SynthesisErrorKind::Backend("offline".into())).into())
    }

    fn name(&self) -> &str {
        "broken"
    }
}

fn store(dir: &TempDir) -> (Arc<ArtifactRegistry>, ArtifactStore) {
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let store = ArtifactStore::new(registry.clone(), "/static/audio");
    (registry, store)
}

#[tokio::test]
async fn test_speech_is_persisted_and_tracked() {
    let dir = TempDir::new().unwrap();
    let (registry, store) = store(&dir);
    let synth = Arc::new(EchoSynth::default());
    let adapter = SpeechAdapter::new(synth.clone(), store);

    let artifact = adapter.render("Once upon a time", VoiceKind::Child).await.unwrap();

    assert!(artifact.url.starts_with("/static/audio/speech_child_"));
    assert_eq!(std::fs::read(&artifact.path).unwrap(), b"Once upon a time");
    assert_eq!(registry.generated_count(), 1);
    assert_eq!(*synth.last_slow.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn test_blank_text_is_rejected_without_calling_backend() {
    let dir = TempDir::new().unwrap();
    let (_registry, store) = store(&dir);
    let synth = Arc::new(EchoSynth::default());
    let adapter = SpeechAdapter::new(synth.clone(), store);

    assert!(adapter.render("   ", VoiceKind::Woman).await.is_err());
    assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_audio_is_a_failure() {
    let dir = TempDir::new().unwrap();
    let (registry, store) = store(&dir);
    let adapter = SpeechAdapter::new(Arc::new(SilentSynth), store);

    let err = adapter.render("Hello", VoiceKind::Man).await.unwrap_err();
    assert!(err.to_string().contains("returned no audio"));
    assert_eq!(registry.generated_count(), 0);
}

#[tokio::test]
async fn test_backend_failure_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let (registry, store) = store(&dir);
    let adapter = SpeechAdapter::new(Arc::new(BrokenSynth), store);

    assert!(adapter.render("Hello", VoiceKind::Man).await.is_err());
    assert_eq!(registry.generated_count(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_ambient_renders_theme_script() {
    let dir = TempDir::new().unwrap();
    let (registry, store) = store(&dir);
    let adapter = AmbientAdapter::new(Arc::new(EchoSynth::default()), store, 12);

    let artifact = adapter.render(AmbientTheme::Ocean).await.unwrap().unwrap();

    assert!(artifact.url.starts_with("/static/audio/background_ocean_"));
    let spoken = String::from_utf8(std::fs::read(&artifact.path).unwrap()).unwrap();
    assert_eq!(
        spoken,
        "Ambient Calming ocean waves sounds playing softly in the background for 12 seconds"
    );
    assert_eq!(registry.generated_count(), 1);
}

#[tokio::test]
async fn test_silent_theme_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let (registry, store) = store(&dir);
    let synth = Arc::new(EchoSynth::default());
    let adapter = AmbientAdapter::new(synth.clone(), store, 30);

    assert!(adapter.render(AmbientTheme::None).await.unwrap().is_none());
    assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
    assert_eq!(registry.generated_count(), 0);
}
