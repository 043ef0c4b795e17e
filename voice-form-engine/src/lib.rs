//! Voice-assisted form filling for government scheme applications
//!
//! Citizens fill an application by answering spoken prompts in English or
//! Hindi. Each answer is recognized, normalized for the field it belongs to
//! and read back before moving on.
//!
//! # Features
//!
//! - Bilingual prompts and read-backs (`en-IN`, `hi-IN`)
//! - Spoken number, date, email and state-name normalization
//! - Single active recognition session; a new prompt preempts the old one
//! - Draft saving and submission with required-field checks
//! - PII-redacted logging of recognized values
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use voice_form_engine::{create_provider, AssistantConfig, FormTemplate, VoiceFormAssistant};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AssistantConfig::from_env()?;
//! let providers = create_provider(&config.speech_backend)?;
//! let assistant = VoiceFormAssistant::new(config, FormTemplate::standard_application(), providers);
//!
//! let outcome = assistant.fill_field("mobileNumber").await?;
//! println!("{outcome:?}, {:.0}% complete", assistant.progress().percentage());
//! # Ok(())
//! # }
//! ```
//!
//! The normalizers can also be used on their own:
//!
//! ```rust
//! use voice_form_engine::{normalize, FieldType, Language};
//!
//! assert_eq!(normalize("12 march 1990", FieldType::Date, Language::English, None), "1990-03-12");
//! assert_eq!(normalize("यूपी", FieldType::Select, Language::Hindi, Some("state")), "uttar-pradesh");
//! ```

pub mod announcements;
pub mod assistant;
pub mod config;
pub mod error;
pub mod form;
pub mod language;
pub mod lexicon;
pub mod normalizer;
pub mod providers;
pub mod submission;

pub use announcements::*;
pub use assistant::*;
pub use config::*;
pub use error::*;
pub use form::*;
pub use language::*;
pub use lexicon::{Lexicon, LexiconEntry};
pub use normalizer::*;
pub use providers::{create_provider, RecognitionOptions, SpeechProviders, SpeechRecognizer, SpeechSynthesizer};
pub use submission::*;
