//! Router construction and the server loop.

use crate::config::TextTaleConfig;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use std::future::Future;
use texttale_error::{ServerError, ServerErrorKind, TextTaleResult};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

fn cors(config: &TextTaleConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server()
        .allowed_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router.
///
/// Generated clips are served from the artifact directory under the configured
/// public prefix.
pub fn router(state: AppState, config: &TextTaleConfig) -> Router {
    let prefix = config.audio().public_prefix().trim_end_matches('/');
    let audio_dir = state.registry.directory().to_path_buf();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/story-options", get(handlers::story_options))
        .route("/api/generate-story", post(handlers::generate_story))
        .route("/api/text-to-speech", post(handlers::text_to_speech))
        .route("/api/cleanup-audio", post(handlers::cleanup_audio))
        .nest_service(prefix, ServeDir::new(audio_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors(config))
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves, then drain in-flight requests.
///
/// # Errors
///
/// Returns error if the listener cannot be bound or the server loop fails.
#[tracing::instrument(skip_all, fields(host = %config.server().host(), port = config.server().port()))]
pub async fn serve(
    config: &TextTaleConfig,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> TextTaleResult<()> {
    let address = format!("{}:{}", config.server().host(), config.server().port());
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", address, e))))?;

    tracing::info!(address = %address, "TextTale listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    tracing::info!("Server stopped");
    Ok(())
}
