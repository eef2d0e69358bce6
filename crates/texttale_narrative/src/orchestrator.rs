//! Per-request audio fan-out.
//!
//! Every scene gets one speech task and, unless the theme is silent, one ambient
//! task. Tasks share a fixed pool of worker slots, and a slot stays taken until
//! the synthesis call itself returns. A task waits at most one budget for a slot
//! and then runs for at most one budget. Past the run budget it is reported as
//! failed, but its synthesis keeps running detached (still holding the slot) so a
//! late artifact is still tracked for cleanup.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use texttale_audio::{AmbientAdapter, SpeechAdapter};
use texttale_core::{
    AmbientTheme, Scene, StoryPlan, SynthesisKind, SynthesisResult, SynthesisTask, VoiceKind,
};
use texttale_error::{OrchestrationError, OrchestrationErrorKind, TextTaleResult};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// The `[orchestrator]` configuration section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(default)]
pub struct OrchestratorConfig {
    /// Concurrent synthesis tasks across all requests
    #[serde(default = "default_max_workers")]
    max_workers: usize,
    /// Wall-clock budget per task, in seconds
    #[serde(default = "default_task_timeout")]
    task_timeout_secs: u64,
    /// Duration announced by ambient clips, in seconds
    #[serde(default = "default_ambient_duration")]
    ambient_duration_secs: u64,
}

fn default_max_workers() -> usize {
    5
}

fn default_task_timeout() -> u64 {
    30
}

fn default_ambient_duration() -> u64 {
    30
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            task_timeout_secs: default_task_timeout(),
            ambient_duration_secs: default_ambient_duration(),
        }
    }
}

impl OrchestratorConfig {
    /// Create a builder.
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }

    /// Per-task budget.
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }

    /// Reject settings the pool cannot run with.
    ///
    /// # Errors
    ///
    /// Returns error if `max_workers` or `task_timeout_secs` is zero.
    #[track_caller]
    pub fn validate(&self) -> Result<(), OrchestrationError> {
        if self.max_workers == 0 {
            return Err(OrchestrationError::new(
                OrchestrationErrorKind::InvalidWorkerLimit(self.max_workers),
            ));
        }
        if self.task_timeout_secs == 0 {
            return Err(OrchestrationError::new(
                OrchestrationErrorKind::InvalidTimeout(self.task_timeout_secs),
            ));
        }
        Ok(())
    }
}

/// Drives speech and ambient synthesis for a story.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    speech: SpeechAdapter,
    ambient: AmbientAdapter,
    slots: Arc<Semaphore>,
    budget: Duration,
}

impl Orchestrator {
    /// Create an orchestrator with `config.max_workers` slots.
    ///
    /// # Errors
    ///
    /// Returns an orchestration error if the configuration is unusable.
    pub fn new(
        speech: SpeechAdapter,
        ambient: AmbientAdapter,
        config: &OrchestratorConfig,
    ) -> TextTaleResult<Self> {
        config.validate()?;
        Ok(Self {
            speech,
            ambient,
            slots: Arc::new(Semaphore::new(config.max_workers)),
            budget: config.task_timeout(),
        })
    }

    /// Adapter used for narration.
    pub fn speech(&self) -> &SpeechAdapter {
        &self.speech
    }

    /// Per-task budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Refuse new work. Stories already in flight finish normally.
    pub fn close(&self) {
        self.slots.close();
    }

    /// Synthesize audio for every scene of `plan` and merge it in plan order.
    ///
    /// Individual task failures and timeouts leave the matching URL empty. Returns
    /// once every task has finished or exhausted its budget.
    ///
    /// # Errors
    ///
    /// Returns an orchestration error if the pool has been closed.
    #[tracing::instrument(skip(self, plan), fields(scenes = plan.len(), voice = %voice, theme = %theme))]
    pub async fn assemble_story(
        &self,
        plan: &StoryPlan,
        voice: VoiceKind,
        theme: AmbientTheme,
    ) -> TextTaleResult<Vec<Scene>> {
        if self.slots.is_closed() {
            return Err(OrchestrationError::new(OrchestrationErrorKind::PoolClosed(
                "worker pool is shut down".to_string(),
            ))
            .into());
        }

        let mut tasks = Vec::with_capacity(plan.len() * 2);
        for draft in plan.iter() {
            tasks.push(SynthesisTask::Speech {
                scene_index: draft.index,
                text: draft.text.clone(),
                voice,
            });
            if !theme.is_silent() {
                tasks.push(SynthesisTask::Ambient {
                    scene_index: draft.index,
                    theme,
                });
            }
        }

        let handles: Vec<(usize, SynthesisKind, JoinHandle<SynthesisResult>)> = tasks
            .into_iter()
            .map(|task| {
                let scene_index = task.scene_index();
                let kind = task.kind();
                (scene_index, kind, self.dispatch(task))
            })
            .collect();
        tracing::debug!(tasks = handles.len(), "Dispatched synthesis tasks");

        // Barrier: wait for every task; supervisors bound their own run time.
        let mut results = Vec::with_capacity(handles.len());
        for (scene_index, kind, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(scene = scene_index, kind = %kind, error = %e, "Synthesis worker crashed");
                    SynthesisResult::failed(scene_index, kind)
                }
            };
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.failed).count();
        tracing::info!(tasks = results.len(), failed, "Synthesis fan-out finished");
        Ok(merge_results(plan, &results))
    }

    /// Spawn a supervisor that waits for a slot and then for `task`, each within
    /// the budget.
    ///
    /// The slot moves into the synthesis future, so work the supervisor stopped
    /// waiting for keeps counting against the pool until it really ends.
    fn dispatch(&self, task: SynthesisTask) -> JoinHandle<SynthesisResult> {
        let slots = Arc::clone(&self.slots);
        let budget = self.budget;
        let speech = self.speech.clone();
        let ambient = self.ambient.clone();

        tokio::spawn(async move {
            let scene_index = task.scene_index();
            let kind = task.kind();

            let slot = match tokio::time::timeout(budget, slots.acquire_owned()).await {
                Ok(Ok(slot)) => slot,
                Ok(Err(_)) => {
                    tracing::warn!(scene = scene_index, kind = %kind, "Worker pool closed before task started");
                    return SynthesisResult::failed(scene_index, kind);
                }
                Err(_) => {
                    tracing::warn!(
                        scene = scene_index,
                        kind = %kind,
                        budget_secs = budget.as_secs(),
                        "No worker slot freed up within budget"
                    );
                    return SynthesisResult::failed(scene_index, kind);
                }
            };

            let mut work = tokio::spawn(async move {
                let _slot = slot;
                run(task, speech, ambient).await
            });
            match tokio::time::timeout(budget, &mut work).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    tracing::warn!(scene = scene_index, kind = %kind, error = %e, "Synthesis task panicked");
                    SynthesisResult::failed(scene_index, kind)
                }
                Err(_) => {
                    // Dropping the handle detaches the work; it keeps its slot and still tracks its file.
                    tracing::warn!(
                        scene = scene_index,
                        kind = %kind,
                        budget_secs = budget.as_secs(),
                        "Synthesis task timed out"
                    );
                    SynthesisResult::failed(scene_index, kind)
                }
            }
        })
    }
}

async fn run(task: SynthesisTask, speech: SpeechAdapter, ambient: AmbientAdapter) -> SynthesisResult {
    match task {
        SynthesisTask::Speech {
            scene_index,
            text,
            voice,
        } => match speech.render(&text, voice).await {
            Ok(artifact) => {
                SynthesisResult::succeeded(scene_index, SynthesisKind::Speech, artifact.url)
            }
            Err(e) => {
                tracing::warn!(scene = scene_index, error = %e, "Speech synthesis failed");
                SynthesisResult::failed(scene_index, SynthesisKind::Speech)
            }
        },
        SynthesisTask::Ambient { scene_index, theme } => match ambient.render(theme).await {
            Ok(Some(artifact)) => {
                SynthesisResult::succeeded(scene_index, SynthesisKind::Ambient, artifact.url)
            }
            Ok(None) => SynthesisResult::empty(scene_index, SynthesisKind::Ambient),
            Err(e) => {
                tracing::warn!(scene = scene_index, error = %e, "Ambient synthesis failed");
                SynthesisResult::failed(scene_index, SynthesisKind::Ambient)
            }
        },
    }
}

/// Fold task results into one scene per draft, in plan order.
///
/// Missing, failed and empty results all become empty URLs. Results for indices
/// outside the plan are ignored.
pub fn merge_results(plan: &StoryPlan, results: &[SynthesisResult]) -> Vec<Scene> {
    let mut scenes: Vec<Scene> = plan.iter().map(|d| Scene::text_only(&d.text)).collect();
    for result in results {
        let Some(scene) = scenes.get_mut(result.scene_index) else {
            continue;
        };
        let url = result.url_or_empty();
        match result.kind {
            SynthesisKind::Speech => scene.audio_url = url,
            SynthesisKind::Ambient => scene.background_noise_url = url,
        }
    }
    scenes
}
