//! Request handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use texttale_core::{
    CleanupResponse, ServiceInfo, SpeechRequest, SpeechResponse, StoryOptions, StoryRequest,
    StoryResponse,
};
use texttale_error::ValidationError;

pub(crate) async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "TextTale API is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec![
            "Structured narrative generation".to_string(),
            "Per-scene narration and ambient audio".to_string(),
            "Multiple story lengths (short, medium, long)".to_string(),
            "Automatic cleanup of generated audio".to_string(),
        ],
    })
}

pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub(crate) async fn story_options() -> Json<StoryOptions> {
    Json(StoryOptions::all())
}

#[tracing::instrument(skip_all)]
pub(crate) async fn generate_story(
    State(state): State<AppState>,
    body: Result<Json<StoryRequest>, JsonRejection>,
) -> Result<Json<StoryResponse>, ApiError> {
    let Json(request) = body?;
    let params = request.validate()?;
    let response = state.service.generate(&params).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn text_to_speech(
    State(state): State<AppState>,
    body: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Json<SpeechResponse>, ApiError> {
    let Json(request) = body?;
    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ValidationError::new(vec!["Text cannot be empty".to_string()]).into());
    }

    let voice = request
        .voice
        .as_deref()
        .and_then(|name| name.trim().parse().ok())
        .unwrap_or_else(|| state.service.narrator());

    let response = match state.service.speak(text, voice).await {
        Some(artifact) => SpeechResponse {
            success: true,
            audio_url: Some(artifact.url),
            message: "Audio generated successfully".to_string(),
        },
        None => SpeechResponse {
            success: false,
            audio_url: None,
            message: "Failed to generate audio".to_string(),
        },
    };
    Ok(Json(response))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn cleanup_audio(State(state): State<AppState>) -> Json<CleanupResponse> {
    let registry = Arc::clone(&state.registry);
    let response = match tokio::task::spawn_blocking(move || registry.cleanup_generated()).await {
        Ok(report) if report.failures.is_empty() => CleanupResponse {
            success: true,
            message: format!("Audio cleanup completed: removed {} file(s)", report.removed),
            removed: report.removed,
        },
        Ok(report) => CleanupResponse {
            success: false,
            message: format!(
                "Audio cleanup finished with errors: removed {} file(s), {} could not be removed",
                report.removed,
                report.failures.len()
            ),
            removed: report.removed,
        },
        Err(e) => {
            tracing::error!(error = %e, "Cleanup task failed");
            CleanupResponse {
                success: false,
                message: format!("Cleanup failed: {}", e),
                removed: 0,
            }
        }
    };
    Json(response)
}
