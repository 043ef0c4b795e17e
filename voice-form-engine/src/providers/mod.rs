pub mod console;
pub mod scripted;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SpeechBackend;
use crate::error::{CapabilityError, FormResult};
use crate::language::Language;

/// Recognizer settings for one listening session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub language: Language,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionOptions {
    /// One final utterance, no partial results.
    pub fn single_utterance(language: Language) -> Self {
        Self {
            language,
            continuous: false,
            interim_results: false,
        }
    }

    pub fn locale_tag(&self) -> &'static str {
        self.language.locale_tag()
    }
}

/// Text-to-speech capability
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text`, resolving once playback has finished.
    async fn speak(&self, text: &str, language: Language) -> Result<(), CapabilityError>;
}

/// Speech-to-text capability
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listen for one utterance and return its transcript.
    ///
    /// Dropping the returned future abandons the session; callers pair it with
    /// [`SpeechRecognizer::stop_listening`] to release the microphone.
    async fn listen(&self, options: &RecognitionOptions) -> Result<String, CapabilityError>;

    /// Stop any active session. Must be safe to call when idle.
    fn stop_listening(&self);
}

/// Synthesizer and recognizer pair driving one assistant
#[derive(Clone)]
pub struct SpeechProviders {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
}

impl SpeechProviders {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self { synthesizer, recognizer }
    }
}

/// Create speech providers based on configuration
///
/// # Errors
///
/// Currently infallible for the built-in backends; kept fallible for backends
/// that need to probe the environment.
pub fn create_provider(backend: &SpeechBackend) -> FormResult<SpeechProviders> {
    match backend {
        SpeechBackend::Console => Ok(SpeechProviders::new(
            Arc::new(console::ConsoleSynthesizer::new()),
            Arc::new(console::ConsoleRecognizer::new()),
        )),
        SpeechBackend::Scripted => Ok(SpeechProviders::new(
            Arc::new(scripted::ScriptedSynthesizer::new()),
            Arc::new(scripted::ScriptedRecognizer::new(Vec::new())),
        )),
    }
}
