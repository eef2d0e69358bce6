//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Bundled defaults (`texttale.toml` compiled into the binary)
//! 2. `./texttale.toml` if present
//! 3. An explicit file passed by the caller
//! 4. `TEXTTALE__SECTION__KEY` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use texttale_audio::TtsSettings;
use texttale_core::VoiceKind;
use texttale_error::{ConfigError, TextTaleResult};
use texttale_narrative::OrchestratorConfig;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../texttale.toml");

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ServerSettings {
    /// Bind address
    host: String,
    /// Bind port
    port: u16,
    /// Origins allowed by CORS
    #[serde(default)]
    allowed_origins: Vec<String>,
}

/// The `[audio]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AudioSettings {
    /// Directory generated clips are written to
    directory: PathBuf,
    /// URL prefix the directory is served under
    public_prefix: String,
    /// Narrator voice and speech fallback
    default_voice: String,
}

/// The `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset
    level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    json: bool,
}

/// Complete service configuration.
///
/// # Example
///
/// ```
/// use texttale_server::TextTaleConfig;
///
/// let config = TextTaleConfig::from_toml("[server]\nport = 9000").unwrap();
/// assert_eq!(*config.server().port(), 9000);
/// assert_eq!(*config.orchestrator().max_workers(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TextTaleConfig {
    /// HTTP listener
    server: ServerSettings,
    /// Artifact directory and voices
    audio: AudioSettings,
    /// Fan-out pool
    orchestrator: OrchestratorConfig,
    /// Speech backend
    tts: TtsSettings,
    /// Logging
    log: LogSettings,
}

impl TextTaleConfig {
    /// Load configuration from every source.
    ///
    /// `explicit` must exist if given; `./texttale.toml` is optional.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or parsed, or if validation fails.
    #[instrument(skip(explicit), fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> TextTaleResult<Self> {
        debug!("Loading configuration: env > explicit file > ./texttale.toml > bundled defaults");

        let mut builder = Self::defaults().add_source(File::with_name("texttale").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("TEXTTALE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins"),
        );

        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a TOML string. Ignores files and environment.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML cannot be parsed or validation fails.
    pub fn from_toml(overrides: &str) -> TextTaleResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(overrides, FileFormat::Toml)))
    }

    /// Parsed default voice.
    pub fn default_voice(&self) -> VoiceKind {
        self.audio
            .default_voice
            .parse()
            .unwrap_or_default()
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> TextTaleResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orchestrator
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid orchestrator settings: {}", e.kind)))?;

        if self.audio.default_voice.parse::<VoiceKind>().is_err() {
            return Err(ConfigError::new(format!(
                "Unknown audio.default_voice '{}' (expected one of {})",
                self.audio.default_voice,
                VoiceKind::names().join(", ")
            )));
        }

        let prefix = self.audio.public_prefix.trim_end_matches('/');
        if !prefix.starts_with('/') || prefix.is_empty() {
            return Err(ConfigError::new(format!(
                "audio.public_prefix must be a non-root absolute path, got '{}'",
                self.audio.public_prefix
            )));
        }

        if *self.tts.request_timeout_secs() == 0 {
            return Err(ConfigError::new("tts.request_timeout_secs must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texttale_audio::TtsBackendKind;

    #[test]
    fn bundled_defaults_load() {
        let config = TextTaleConfig::from_toml("").unwrap();
        assert_eq!(config.server().host(), "0.0.0.0");
        assert_eq!(*config.server().port(), 8001);
        assert_eq!(config.server().allowed_origins().len(), 2);
        assert_eq!(config.audio().directory(), Path::new("static/audio"));
        assert_eq!(config.audio().public_prefix(), "/static/audio");
        assert_eq!(config.default_voice(), VoiceKind::Woman);
        assert_eq!(*config.orchestrator().task_timeout_secs(), 30);
        assert_eq!(*config.tts().backend(), TtsBackendKind::Google);
        assert_eq!(config.log().level(), "info");
        assert!(!config.log().json());
    }

    #[test]
    fn overrides_win() {
        let config = TextTaleConfig::from_toml(
            "[orchestrator]\nmax_workers = 2\n[tts]\nbackend = \"openai\"\napi_key = \"k\"",
        )
        .unwrap();
        assert_eq!(*config.orchestrator().max_workers(), 2);
        assert_eq!(*config.tts().backend(), TtsBackendKind::OpenAi);
        assert_eq!(config.tts().api_key().as_deref(), Some("k"));
    }

    #[test]
    fn zero_workers_rejected() {
        let err = TextTaleConfig::from_toml("[orchestrator]\nmax_workers = 0").unwrap_err();
        assert!(err.to_string().contains("Invalid orchestrator settings"));
    }

    #[test]
    fn unknown_backend_rejected() {
        assert!(TextTaleConfig::from_toml("[tts]\nbackend = \"espeak\"").is_err());
    }

    #[test]
    fn unknown_voice_rejected() {
        let err = TextTaleConfig::from_toml("[audio]\ndefault_voice = \"robot\"").unwrap_err();
        assert!(err.to_string().contains("default_voice"));
    }

    #[test]
    fn root_prefix_rejected() {
        assert!(TextTaleConfig::from_toml("[audio]\npublic_prefix = \"/\"").is_err());
    }
}
