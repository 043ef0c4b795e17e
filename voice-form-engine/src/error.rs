use thiserror::Error;
use uuid::Uuid;

use crate::announcements::{localized, Message};
use crate::language::Language;

/// Failure reported by a speech capability (synthesis or recognition).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("Speech capability unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Recognizer ended without hearing speech.
    #[error("No speech detected")]
    NoSpeech,

    #[error("Speech capability failed: {0}")]
    Failed(String),
}

/// Errors surfaced by the form engine.
///
/// An empty transcript and a normalizer fallback are not errors: the first is
/// reported as [`crate::FillOutcome::NoTranscript`], the second only flags the
/// [`crate::Normalized`] value.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Speech recognition unavailable: {0}")]
    RecognitionUnavailable(String),

    #[error("Speech recognition permission denied: {0}")]
    RecognitionDenied(String),

    #[error("Speech recognition failed: {0}")]
    Recognition(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(CapabilityError),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Required fields missing: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Submission not found: {0}")]
    SubmissionNotFound(Uuid),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FormError {
    /// Map a recognizer failure onto the engine taxonomy.
    pub fn from_recognition(error: CapabilityError) -> Self {
        match error {
            CapabilityError::Unavailable(reason) => FormError::RecognitionUnavailable(reason),
            CapabilityError::PermissionDenied(reason) => FormError::RecognitionDenied(reason),
            CapabilityError::NoSpeech => FormError::Recognition("no speech detected".to_string()),
            CapabilityError::Failed(reason) => FormError::Recognition(reason),
        }
    }

    /// Whether the citizen should be shown [`FormError::user_message`].
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            FormError::RecognitionUnavailable(_)
                | FormError::RecognitionDenied(_)
                | FormError::Recognition(_)
                | FormError::Synthesis(_)
                | FormError::MissingRequired(_)
        )
    }

    /// Localized text to show the citizen.
    pub fn user_message(&self, language: Language) -> String {
        let message = match self {
            FormError::RecognitionUnavailable(_)
            | FormError::Synthesis(CapabilityError::Unavailable(_) | CapabilityError::PermissionDenied(_)) => {
                Message::VoiceUnsupported
            }
            FormError::RecognitionDenied(_) => Message::MicrophoneDenied,
            FormError::Recognition(_) | FormError::Synthesis(_) => Message::VoiceRetry,
            FormError::MissingRequired(_) => Message::MissingRequired,
            FormError::Persistence(_) | FormError::SubmissionNotFound(_) | FormError::Serialization(_) => {
                Message::SaveFailed
            }
            FormError::UnknownField(_) | FormError::Config(_) => Message::GenericError,
        };
        localized(message, language).to_string()
    }
}

pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_errors_map_to_taxonomy() {
        assert!(matches!(
            FormError::from_recognition(CapabilityError::Unavailable("no api".into())),
            FormError::RecognitionUnavailable(_)
        ));
        assert!(matches!(
            FormError::from_recognition(CapabilityError::PermissionDenied("blocked".into())),
            FormError::RecognitionDenied(_)
        ));
        assert!(matches!(
            FormError::from_recognition(CapabilityError::Failed("network".into())),
            FormError::Recognition(_)
        ));
    }

    #[test]
    fn test_user_messages_are_localized() {
        let denied = FormError::RecognitionDenied("blocked".into());
        assert!(denied.is_user_facing());
        assert_ne!(denied.user_message(Language::English), denied.user_message(Language::Hindi));
        assert!(denied.user_message(Language::English).contains("Microphone"));
    }

    #[test]
    fn test_blocked_speech_output_is_not_a_microphone_problem() {
        let err = FormError::Synthesis(CapabilityError::PermissionDenied("autoplay blocked".into()));
        assert_eq!(
            err.user_message(Language::English),
            localized(Message::VoiceUnsupported, Language::English)
        );
        let err = FormError::Synthesis(CapabilityError::Failed("device lost".into()));
        assert_eq!(err.user_message(Language::Hindi), localized(Message::VoiceRetry, Language::Hindi));
    }

    #[test]
    fn test_missing_required_lists_fields() {
        let err = FormError::MissingRequired(vec!["dob".into(), "pincode".into()]);
        assert_eq!(err.to_string(), "Required fields missing: dob, pincode");
    }
}
