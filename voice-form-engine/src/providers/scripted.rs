//! In-memory speech capabilities replaying a fixed script.
//!
//! Used by tests and dry runs: the synthesizer records what it was asked to
//! say, the recognizer hands out queued utterances in order.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::CapabilityError;
use crate::language::Language;
use crate::providers::{RecognitionOptions, SpeechRecognizer, SpeechSynthesizer};

/// One scripted recognizer turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    Say(String),
    Fail(CapabilityError),
    /// Never resolves; the session only ends when stopped or dropped.
    Hang,
}

impl Utterance {
    pub fn say(text: impl Into<String>) -> Self {
        Utterance::Say(text.into())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedSynthesizer {
    spoken: Mutex<Vec<(String, Language)>>,
    failure: Mutex<Option<CapabilityError>>,
    /// Calls that succeed before `failure` kicks in.
    succeed_first: usize,
    calls: AtomicUsize,
}

impl ScriptedSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call to `speak` fails with `error`.
    pub fn failing(error: CapabilityError) -> Self {
        Self::failing_after(0, error)
    }

    /// The first `succeed_first` calls speak normally, later ones fail with `error`.
    pub fn failing_after(succeed_first: usize, error: CapabilityError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            succeed_first,
            ..Self::default()
        }
    }

    pub fn spoken(&self) -> Vec<(String, Language)> {
        self.spoken.lock().clone()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken.lock().iter().map(|(text, _)| text.clone()).collect()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn speak(&self, text: &str, language: Language) -> Result<(), CapabilityError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.succeed_first {
            if let Some(error) = self.failure.lock().clone() {
                return Err(error);
            }
        }
        self.spoken.lock().push((text.to_string(), language));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    script: Mutex<VecDeque<Utterance>>,
    sessions: Mutex<Vec<RecognitionOptions>>,
    stop_calls: AtomicUsize,
}

impl ScriptedRecognizer {
    pub fn new(script: Vec<Utterance>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sessions: Mutex::new(Vec::new()),
            stop_calls: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, utterance: Utterance) {
        self.script.lock().push_back(utterance);
    }

    /// Options of every session started so far.
    pub fn sessions(&self) -> Vec<RecognitionOptions> {
        self.sessions.lock().clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen(&self, options: &RecognitionOptions) -> Result<String, CapabilityError> {
        self.sessions.lock().push(options.clone());
        let next = self.script.lock().pop_front();
        match next {
            Some(Utterance::Say(text)) => Ok(text),
            Some(Utterance::Fail(error)) => Err(error),
            Some(Utterance::Hang) => std::future::pending().await,
            None => Err(CapabilityError::NoSpeech),
        }
    }

    fn stop_listening(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
    }
}
