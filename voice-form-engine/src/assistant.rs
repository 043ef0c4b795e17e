use crate::announcements::{announce_field, confirmation};
use crate::config::AssistantConfig;
use crate::error::{CapabilityError, FormError, FormResult};
use crate::form::{FieldDescriptor, FormState, FormTemplate, Progress};
use crate::language::Language;
use crate::normalizer::normalize_detailed;
use crate::providers::{RecognitionOptions, SpeechProviders, SpeechRecognizer, SpeechSynthesizer};
use logger_redacted::PiiRedactor;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

/// Phase of the current field-fill attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicePhase {
    Idle,
    Announcing,
    Listening,
    Processing,
    Confirming,
}

/// Result of one field-fill attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// Value normalized, stored and read back.
    Filled { field: String, value: String },
    /// Recognizer returned nothing usable; form state untouched.
    NoTranscript { field: String },
    /// A newer attempt, a language change or voice mode off took over.
    Cancelled { field: String },
    /// Voice mode is off; nothing was spoken or heard.
    VoiceModeOff,
}

/// Releases the recognizer on every exit path of a listening phase,
/// including when the surrounding future is dropped.
struct ListeningGuard<'a> {
    recognizer: &'a dyn SpeechRecognizer,
}

impl<'a> ListeningGuard<'a> {
    fn acquire(recognizer: &'a dyn SpeechRecognizer) -> Self {
        Self { recognizer }
    }
}

impl Drop for ListeningGuard<'_> {
    fn drop(&mut self) {
        self.recognizer.stop_listening();
    }
}

struct ActiveAttempt {
    id: u64,
    cancel: oneshot::Sender<()>,
}

/// Deregisters an attempt when its future completes or is dropped. Once the
/// attempt holds the turn, the phase goes back to idle before the turn is
/// handed to the next attempt.
struct AttemptGuard<'a> {
    assistant: &'a VoiceFormAssistant,
    id: u64,
    turn: Option<tokio::sync::MutexGuard<'a, ()>>,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        {
            let mut active = self.assistant.active.lock();
            if active.as_ref().is_some_and(|a| a.id == self.id) {
                active.take();
            }
        }
        if self.turn.is_some() {
            self.assistant.set_phase(VoicePhase::Idle);
        }
    }
}

/// Voice-driven form filling for one citizen session
///
/// Drives "announce, listen, normalize, store, confirm" for one field at a
/// time. Starting an attempt while another is in flight cancels the older one
/// and waits for it to release the recognizer before speaking.
pub struct VoiceFormAssistant {
    config: AssistantConfig,
    template: FormTemplate,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Arc<dyn SpeechRecognizer>,
    state: RwLock<FormState>,
    language: RwLock<Language>,
    voice_mode: AtomicBool,
    phase: watch::Sender<VoicePhase>,
    active: Mutex<Option<ActiveAttempt>>,
    turn: tokio::sync::Mutex<()>,
    next_attempt: AtomicU64,
    redactor: PiiRedactor,
}

impl VoiceFormAssistant {
    /// Create a new assistant for `template`
    pub fn new(config: AssistantConfig, template: FormTemplate, providers: SpeechProviders) -> Self {
        if !config.voice_enabled {
            info!("Voice input disabled by configuration");
        }

        let (phase, _) = watch::channel(VoicePhase::Idle);

        Self {
            language: RwLock::new(config.default_language),
            voice_mode: AtomicBool::new(config.voice_enabled),
            config,
            template,
            synthesizer: providers.synthesizer,
            recognizer: providers.recognizer,
            state: RwLock::new(FormState::new()),
            phase,
            active: Mutex::new(None),
            turn: tokio::sync::Mutex::new(()),
            next_attempt: AtomicU64::new(0),
            redactor: PiiRedactor::default(),
        }
    }

    pub fn with_redactor(mut self, redactor: PiiRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    /// Fill `field_name` by voice.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] when the template has no such field;
    /// recognition and synthesis failures as the matching [`FormError`]
    /// variant, in which case form state is left untouched.
    pub async fn fill_field(&self, field_name: &str) -> FormResult<FillOutcome> {
        if !self.is_voice_mode() {
            return Ok(FillOutcome::VoiceModeOff);
        }

        let field = self
            .template
            .field(field_name)
            .cloned()
            .ok_or_else(|| FormError::UnknownField(field_name.to_string()))?;

        let id = self.next_attempt.fetch_add(1, Ordering::Relaxed);
        let (cancel, mut cancelled) = oneshot::channel();
        let previous = self.active.lock().replace(ActiveAttempt { id, cancel });
        if let Some(previous) = previous {
            debug!(attempt = previous.id, "Preempting active voice attempt");
            let _ = previous.cancel.send(());
        }

        let mut attempt = AttemptGuard { assistant: self, id, turn: None };

        // Wait for the preempted attempt to drop its recognizer session
        let turn = tokio::select! {
            biased;
            _ = &mut cancelled => return Ok(FillOutcome::Cancelled { field: field.name.clone() }),
            turn = self.turn.lock() => turn,
        };
        attempt.turn = Some(turn);

        let outcome = tokio::select! {
            biased;
            _ = &mut cancelled => {
                debug!(field = %field.name, "Voice attempt cancelled");
                Ok(FillOutcome::Cancelled { field: field.name.clone() })
            }
            result = self.run_attempt(&field) => result,
        };
        drop(attempt);
        outcome
    }

    async fn run_attempt(&self, field: &FieldDescriptor) -> FormResult<FillOutcome> {
        let language = self.language();

        self.set_phase(VoicePhase::Announcing);
        let prompt = announce_field(&field.name, language);
        if let Err(e) = self.synthesizer.speak(prompt, language).await {
            warn!(field = %field.name, error = %e, "Prompt synthesis failed");
            return Err(FormError::Synthesis(e));
        }

        tokio::time::sleep(self.config.settle_delay()).await;

        self.set_phase(VoicePhase::Listening);
        let heard = {
            let _session = ListeningGuard::acquire(self.recognizer.as_ref());
            self.recognizer
                .listen(&RecognitionOptions::single_utterance(language))
                .await
        };

        let transcript = match heard {
            Ok(transcript) => transcript,
            Err(CapabilityError::NoSpeech) => {
                debug!(field = %field.name, "Recognizer heard no speech");
                return Ok(FillOutcome::NoTranscript { field: field.name.clone() });
            }
            Err(e) => {
                warn!(field = %field.name, error = %e, "Speech recognition failed");
                return Err(FormError::from_recognition(e));
            }
        };

        if transcript.trim().is_empty() {
            debug!(field = %field.name, "Empty transcript, nothing stored");
            return Ok(FillOutcome::NoTranscript { field: field.name.clone() });
        }

        self.set_phase(VoicePhase::Processing);
        let normalized = normalize_detailed(&transcript, field.field_type, language, Some(&field.name));
        if normalized.is_fallback() {
            debug!(
                field = %field.name,
                field_type = %field.field_type,
                transcript = %self.redactor.redact(&transcript),
                "Transcript not understood, storing cleaned text"
            );
        }

        self.state.write().set(field.name.clone(), normalized.value.clone());
        info!(
            field = %field.name,
            value = %self.redactor.redact(&normalized.value),
            %language,
            "Field filled by voice"
        );

        self.set_phase(VoicePhase::Confirming);
        // The value is already stored; a failed read-back is not worth losing it over
        if let Err(e) = self.synthesizer.speak(&confirmation(&normalized.value, language), language).await {
            warn!(field = %field.name, error = %e, "Confirmation synthesis failed");
        }

        Ok(FillOutcome::Filled {
            field: field.name.clone(),
            value: normalized.value,
        })
    }

    /// Cancel the in-flight attempt, if any, and release the recognizer.
    pub fn cancel(&self) {
        if let Some(active) = self.active.lock().take() {
            debug!(attempt = active.id, "Cancelling voice attempt");
            let _ = active.cancel.send(());
        }
        self.recognizer.stop_listening();
    }

    /// Switch language; any attempt in flight is cancelled first.
    pub fn set_language(&self, language: Language) {
        if self.language() == language {
            return;
        }
        self.cancel();
        *self.language.write() = language;
        info!(%language, "Voice language changed");
    }

    pub fn language(&self) -> Language {
        *self.language.read()
    }

    /// Turn voice mode on or off; turning it off stops listening.
    pub fn set_voice_mode(&self, enabled: bool) {
        let was = self.voice_mode.swap(enabled, Ordering::SeqCst);
        if was && !enabled {
            self.cancel();
        }
    }

    pub fn is_voice_mode(&self) -> bool {
        self.voice_mode.load(Ordering::SeqCst)
    }

    /// Direct text entry, stored as typed.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] when the template has no such field.
    pub fn set_value(&self, field_name: &str, value: impl Into<String>) -> FormResult<()> {
        if self.template.field(field_name).is_none() {
            return Err(FormError::UnknownField(field_name.to_string()));
        }
        self.state.write().set(field_name, value);
        Ok(())
    }

    pub fn value(&self, field_name: &str) -> Option<String> {
        self.state.read().get(field_name).map(str::to_string)
    }

    /// Snapshot of the current form state.
    pub fn form_state(&self) -> FormState {
        self.state.read().clone()
    }

    pub fn template(&self) -> &FormTemplate {
        &self.template
    }

    pub fn progress(&self) -> Progress {
        self.template.progress(&self.state.read())
    }

    pub fn phase(&self) -> VoicePhase {
        *self.phase.borrow()
    }

    /// Observe phase transitions.
    pub fn subscribe_phase(&self) -> watch::Receiver<VoicePhase> {
        self.phase.subscribe()
    }

    fn set_phase(&self, phase: VoicePhase) {
        let previous = self.phase.send_replace(phase);
        if previous != phase {
            debug!(?previous, ?phase, "Voice phase changed");
        }
    }
}

impl Drop for VoiceFormAssistant {
    fn drop(&mut self) {
        self.recognizer.stop_listening();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::scripted::{ScriptedRecognizer, ScriptedSynthesizer, Utterance};
    use std::time::Duration;

    fn assistant(script: Vec<Utterance>) -> (VoiceFormAssistant, Arc<ScriptedSynthesizer>, Arc<ScriptedRecognizer>) {
        let synthesizer = Arc::new(ScriptedSynthesizer::new());
        let recognizer = Arc::new(ScriptedRecognizer::new(script));
        let config = AssistantConfig::default().with_settle_delay(Duration::ZERO);
        let assistant = VoiceFormAssistant::new(
            config,
            FormTemplate::standard_application(),
            SpeechProviders::new(synthesizer.clone(), recognizer.clone()),
        );
        (assistant, synthesizer, recognizer)
    }

    #[tokio::test]
    async fn test_fill_normalizes_by_field_type() {
        let (assistant, synthesizer, _) = assistant(vec![Utterance::say("nine eight seven six five four three two one zero")]);

        let outcome = assistant.fill_field("mobileNumber").await.unwrap();

        assert_eq!(
            outcome,
            FillOutcome::Filled { field: "mobileNumber".into(), value: "9876543210".into() }
        );
        assert_eq!(assistant.value("mobileNumber").as_deref(), Some("9876543210"));
        assert_eq!(
            synthesizer.spoken_texts(),
            vec![
                "Please say your mobile number".to_string(),
                "I heard: 9876543210. Moving to next field.".to_string(),
            ]
        );
        assert_eq!(assistant.phase(), VoicePhase::Idle);
    }

    #[tokio::test]
    async fn test_voice_mode_off_is_noop() {
        let (assistant, synthesizer, recognizer) = assistant(vec![Utterance::say("ignored")]);
        assistant.set_voice_mode(false);

        assert_eq!(assistant.fill_field("fullName").await.unwrap(), FillOutcome::VoiceModeOff);
        assert!(synthesizer.spoken().is_empty());
        assert!(recognizer.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_field() {
        let (assistant, _, _) = assistant(vec![]);
        assert!(matches!(
            assistant.fill_field("aadhaar").await,
            Err(FormError::UnknownField(name)) if name == "aadhaar"
        ));
    }

    #[tokio::test]
    async fn test_set_value_bypasses_normalization() {
        let (assistant, _, _) = assistant(vec![]);
        assistant.set_value("fullName", "sita DEVI").unwrap();
        assert_eq!(assistant.value("fullName").as_deref(), Some("sita DEVI"));
        assert_eq!(assistant.progress().completed, 1);
        assert!(assistant.set_value("aadhaar", "1").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_attempt_returns_to_idle() {
        let (assistant, _, recognizer) = assistant(vec![Utterance::Hang, Utterance::say("ramesh")]);

        let timed_out = tokio::time::timeout(Duration::from_millis(50), assistant.fill_field("fullName")).await;

        assert!(timed_out.is_err());
        assert_eq!(assistant.phase(), VoicePhase::Idle);
        assert!(assistant.active.lock().is_none());
        assert_eq!(recognizer.stop_calls(), 1);

        // The turn was released, so the next attempt runs normally
        let outcome = assistant.fill_field("fatherName").await.unwrap();
        assert_eq!(outcome, FillOutcome::Filled { field: "fatherName".into(), value: "Ramesh".into() });
        assert_eq!(assistant.phase(), VoicePhase::Idle);
    }
}
