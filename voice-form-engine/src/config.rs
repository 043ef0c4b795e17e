use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{FormError, FormResult};
use crate::language::Language;

/// Pause between the end of a spoken prompt and the start of recognition, so
/// the recognizer does not pick up the prompt's tail through the speakers.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 2000;

/// Where speech synthesis and recognition come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// Prompts printed to stdout, answers typed on stdin
    Console,
    /// Pre-recorded transcripts, for tests and dry runs
    Scripted,
}

/// Voice form assistant configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub voice_enabled: bool,
    pub default_language: Language,
    pub settle_delay_ms: u64,
    pub speech_backend: SpeechBackend,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            voice_enabled: true,
            default_language: Language::English,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            speech_backend: SpeechBackend::Console,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Config`] for an unknown `VOICE_FORM_SPEECH_BACKEND`.
    pub fn from_env() -> FormResult<Self> {
        let voice_enabled = std::env::var("VOICE_FORM_ENABLED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        let default_language = std::env::var("VOICE_FORM_LANGUAGE")
            .map(|s| Language::from_param(&s))
            .unwrap_or_default();

        let settle_delay_ms = std::env::var("VOICE_FORM_SETTLE_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SETTLE_DELAY_MS);

        let speech_backend = match std::env::var("VOICE_FORM_SPEECH_BACKEND") {
            Ok(backend) => Self::parse_backend(&backend)?,
            Err(_) => SpeechBackend::Console,
        };

        Ok(Self {
            voice_enabled,
            default_language,
            settle_delay_ms,
            speech_backend,
        })
    }

    fn parse_backend(value: &str) -> FormResult<SpeechBackend> {
        match value.trim().to_lowercase().as_str() {
            "console" => Ok(SpeechBackend::Console),
            "scripted" => Ok(SpeechBackend::Scripted),
            other => Err(FormError::Config(format!("Unknown speech backend: {other}"))),
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
