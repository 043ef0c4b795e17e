//! Terminal speech capabilities
//!
//! Stand-ins for the browser's speech synthesis and recognition when running
//! the engine from a shell: prompts are printed, answers are typed.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::CapabilityError;
use crate::language::Language;
use crate::providers::{RecognitionOptions, SpeechRecognizer, SpeechSynthesizer};

#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl ConsoleSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str, language: Language) -> Result<(), CapabilityError> {
        let line = format!("[{}] 🔊 {text}\n", language.locale_tag());
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;
        stdout.flush().await.map_err(|e| CapabilityError::Failed(e.to_string()))
    }
}

pub struct ConsoleRecognizer {
    // One reader for the whole process so buffered input is not lost between turns
    input: Mutex<BufReader<Stdin>>,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for ConsoleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    async fn listen(&self, options: &RecognitionOptions) -> Result<String, CapabilityError> {
        debug!(locale = options.locale_tag(), "Waiting for typed utterance");

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all("🎤 > ".as_bytes())
            .await
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;
        stdout.flush().await.map_err(|e| CapabilityError::Failed(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;

        if read == 0 {
            return Err(CapabilityError::Unavailable("stdin closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn stop_listening(&self) {
        debug!("Console recognizer stopped");
    }
}
