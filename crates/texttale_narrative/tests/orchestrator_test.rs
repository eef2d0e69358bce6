//! Fan-out tests with scripted in-process synthesizers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use texttale_audio::{AmbientAdapter, SpeechAdapter, SpeechSynthesizer};
use texttale_core::{
    AmbientTheme, StoryLength, StoryParams, StoryPlan, StoryStyle, VoiceKind, VoiceProfile,
};
use texttale_error::{SynthesisError, SynthesisErrorKind, TextTaleResult};
use texttale_narrative::{
    CharacterComposer, Orchestrator, OrchestratorConfig, ScenePlanner, StoryService,
};
use texttale_storage::{ArtifactRegistry, ArtifactStore};

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Fail,
    Hang,
    Slow(Duration),
}

/// Ambient clips are recognised by their script prefix; speech containing
/// "hang" hangs regardless of the speech behavior.
struct ScriptedSynth {
    speech: Behavior,
    ambient: Behavior,
    calls: AtomicUsize,
    ambient_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedSynth {
    fn new(speech: Behavior, ambient: Behavior) -> Arc<Self> {
        Arc::new(Self {
            speech,
            ambient,
            calls: AtomicUsize::new(0),
            ambient_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for ScriptedSynth {
    async fn synthesize(&self, text: &str, _voice: &VoiceProfile) -> TextTaleResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let is_ambient = text.starts_with("Ambient ");
        if is_ambient {
            self.ambient_calls.fetch_add(1, Ordering::SeqCst);
        }
        let behavior = if is_ambient {
            self.ambient
        } else if text.contains("hang") {
            Behavior::Hang
        } else {
            self.speech
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let outcome = match behavior {
            Behavior::Succeed => Ok(b"ID3".to_vec()),
            Behavior::Fail => {
                Err(SynthesisError::new(SynthesisErrorKind::Backend("scripted".into())).into())
            }
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Behavior::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(b"ID3".to_vec())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct Harness {
    dir: TempDir,
    registry: Arc<ArtifactRegistry>,
    orchestrator: Orchestrator,
}

fn harness(synth: Arc<ScriptedSynth>, max_workers: usize, timeout_secs: u64) -> Harness {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let store = ArtifactStore::new(registry.clone(), "/static/audio");
    let config = OrchestratorConfig::builder()
        .max_workers(max_workers)
        .task_timeout_secs(timeout_secs)
        .build()
        .unwrap();
    let orchestrator = Orchestrator::new(
        SpeechAdapter::new(synth.clone(), store.clone()),
        AmbientAdapter::new(synth, store, 30),
        &config,
    )
    .unwrap();
    Harness {
        dir,
        registry,
        orchestrator,
    }
}

fn short_plan() -> StoryPlan {
    ScenePlanner::new().plan("a clockmaker's apprentice", StoryStyle::Fantasy, StoryLength::Short)
}

fn file_exists(h: &Harness, url: &str) -> bool {
    let name = url.trim_start_matches("/static/audio/");
    h.dir.path().join(name).exists()
}

#[tokio::test]
async fn test_all_audio_succeeds_in_plan_order() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Succeed);
    let h = harness(synth.clone(), 5, 10);
    let plan = short_plan();

    let scenes = h
        .orchestrator
        .assemble_story(&plan, VoiceKind::Woman, AmbientTheme::Forest)
        .await
        .unwrap();

    assert_eq!(scenes.len(), 7);
    for (scene, draft) in scenes.iter().zip(plan.iter()) {
        assert_eq!(scene.text, draft.text);
        assert!(file_exists(&h, &scene.audio_url));
        assert!(file_exists(&h, &scene.background_noise_url));
    }
    assert_eq!(synth.calls.load(Ordering::SeqCst), 14);
    assert_eq!(h.registry.generated_count(), 14);
}

#[tokio::test]
async fn test_every_ambient_failure_keeps_story() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Fail);
    let h = harness(synth, 5, 10);

    let scenes = h
        .orchestrator
        .assemble_story(&short_plan(), VoiceKind::Man, AmbientTheme::Rain)
        .await
        .unwrap();

    assert_eq!(scenes.len(), 7);
    for scene in &scenes {
        assert!(!scene.audio_url.is_empty());
        assert!(scene.background_noise_url.is_empty());
    }
    assert_eq!(h.registry.generated_count(), 7);
}

#[tokio::test]
async fn test_every_failure_still_returns_text() {
    let synth = ScriptedSynth::new(Behavior::Fail, Behavior::Fail);
    let h = harness(synth, 5, 10);
    let plan = short_plan();

    let scenes = h
        .orchestrator
        .assemble_story(&plan, VoiceKind::Child, AmbientTheme::City)
        .await
        .unwrap();

    assert_eq!(scenes.len(), plan.len());
    assert!(scenes.iter().all(|s| s.audio_url.is_empty() && s.background_noise_url.is_empty()));
    assert_eq!(h.registry.generated_count(), 0);
}

#[tokio::test]
async fn test_silent_theme_dispatches_no_ambient_work() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Succeed);
    let h = harness(synth.clone(), 5, 10);

    let scenes = h
        .orchestrator
        .assemble_story(&short_plan(), VoiceKind::Woman, AmbientTheme::None)
        .await
        .unwrap();

    assert!(scenes.iter().all(|s| s.background_noise_url.is_empty()));
    assert_eq!(synth.ambient_calls.load(Ordering::SeqCst), 0);
    let background_files = std::fs::read_dir(h.dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("background_"))
        .count();
    assert_eq!(background_files, 0);
}

#[tokio::test]
async fn test_hung_task_is_bounded_by_budget() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Succeed);
    let h = harness(synth, 5, 1);
    let plan = StoryPlan::from_texts(["please hang here".to_string(), "all fine".to_string()]);

    let started = Instant::now();
    let scenes = h
        .orchestrator
        .assemble_story(&plan, VoiceKind::Woman, AmbientTheme::None)
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(scenes[0].audio_url.is_empty());
    assert!(!scenes[1].audio_url.is_empty());
}

#[tokio::test]
async fn test_late_artifact_is_still_tracked() {
    let synth = ScriptedSynth::new(Behavior::Slow(Duration::from_millis(1500)), Behavior::Succeed);
    let h = harness(synth, 5, 1);
    let plan = StoryPlan::from_texts(["slow scene".to_string()]);

    let scenes = h
        .orchestrator
        .assemble_story(&plan, VoiceKind::Woman, AmbientTheme::None)
        .await
        .unwrap();
    assert!(scenes[0].audio_url.is_empty());
    assert_eq!(h.registry.generated_count(), 0);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(h.registry.generated_count(), 1);
    assert_eq!(h.registry.cleanup_generated().removed, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_never_exceeds_worker_limit() {
    let synth = ScriptedSynth::new(
        Behavior::Slow(Duration::from_millis(50)),
        Behavior::Slow(Duration::from_millis(50)),
    );
    let h = harness(synth.clone(), 2, 10);

    let scenes = h
        .orchestrator
        .assemble_story(&short_plan(), VoiceKind::Woman, AmbientTheme::Library)
        .await
        .unwrap();

    assert_eq!(scenes.len(), 7);
    assert!(synth.peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(synth.calls.load(Ordering::SeqCst), 14);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hung_backend_keeps_worker_slots() {
    let synth = ScriptedSynth::new(Behavior::Hang, Behavior::Hang);
    let h = harness(synth.clone(), 2, 1);
    let plan = StoryPlan::from_texts((0..4).map(|i| format!("scene {i}")));

    let started = Instant::now();
    let scenes = h
        .orchestrator
        .assemble_story(&plan, VoiceKind::Woman, AmbientTheme::None)
        .await
        .unwrap();

    // One budget waiting for a slot plus one budget running, plus slack.
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(scenes.len(), 4);
    assert!(scenes.iter().all(|s| s.audio_url.is_empty()));
    assert_eq!(synth.peak.load(Ordering::SeqCst), 2);
    assert_eq!(synth.calls.load(Ordering::SeqCst), 2);

    // A second story on the same orchestrator cannot get past the stuck calls either.
    let again = h
        .orchestrator
        .assemble_story(&plan, VoiceKind::Woman, AmbientTheme::None)
        .await
        .unwrap();
    assert!(again.iter().all(|s| s.audio_url.is_empty()));
    assert_eq!(synth.peak.load(Ordering::SeqCst), 2);
    assert_eq!(synth.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_closed_pool_fails_the_request() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Succeed);
    let h = harness(synth.clone(), 5, 10);
    h.orchestrator.close();

    let result = h
        .orchestrator
        .assemble_story(&short_plan(), VoiceKind::Woman, AmbientTheme::None)
        .await;

    assert!(result.is_err());
    assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_story_service_generates_full_response() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Fail);
    let h = harness(synth, 5, 10);
    let service = StoryService::new(
        CharacterComposer::with_seed(11),
        h.orchestrator.clone(),
        VoiceKind::Woman,
    );
    let params = StoryParams {
        prompt: "A cartographer maps a moving island".to_string(),
        style: StoryStyle::Adventure,
        length: StoryLength::Medium,
        characters: vec!["Ines".to_string()],
        background: AmbientTheme::Ocean,
    };

    let response = service.generate(&params).await.unwrap();

    assert!(response.success);
    assert_eq!(response.story.len(), 11);
    assert_eq!(response.characters.len(), 3);
    assert_eq!(response.characters[0].name, "Ines");
    assert_eq!(
        response.message,
        "Successfully generated 11 scenes with 3 characters"
    );
    assert!(response.introduction.contains("Ines"));
}

#[tokio::test]
async fn test_speak_returns_none_on_failure() {
    let synth = ScriptedSynth::new(Behavior::Fail, Behavior::Fail);
    let h = harness(synth, 5, 10);
    let service = StoryService::new(CharacterComposer::with_seed(1), h.orchestrator.clone(), VoiceKind::Woman);

    assert!(service.speak("Hello there", VoiceKind::Man).await.is_none());
}

#[tokio::test]
async fn test_speak_returns_tracked_artifact() {
    let synth = ScriptedSynth::new(Behavior::Succeed, Behavior::Succeed);
    let h = harness(synth, 5, 10);
    let service = StoryService::new(CharacterComposer::with_seed(1), h.orchestrator.clone(), VoiceKind::Woman);

    let artifact = service.speak("Hello there", VoiceKind::Man).await.unwrap();
    assert!(artifact.url.starts_with("/static/audio/speech_man_"));
    assert_eq!(h.registry.generated_count(), 1);
}
