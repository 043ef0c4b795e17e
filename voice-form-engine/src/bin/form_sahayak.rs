use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use logger_redacted::{init_logging, redactor_for, LoggerConfig};
use voice_form_engine::{
    create_provider, field_label, localized, AssistantConfig, FillOutcome, FormError, FormSession, FormTemplate,
    InMemoryFormStore, Language, Message, VoiceFormAssistant,
};

/// Voice-assisted scheme application, one field at a time
#[derive(Parser, Debug)]
#[command(name = "form-sahayak")]
#[command(about = "Fill a government scheme application by voice in English or Hindi")]
struct Args {
    /// Prompt language: "english" or "hindi"
    #[arg(short, long, env = "VOICE_FORM_LANGUAGE")]
    lang: Option<String>,

    /// Scheme the application is for
    #[arg(short, long, default_value = "pradhan-mantri-ujjwala-yojana")]
    scheme: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let logger_config = LoggerConfig::default()
        .with_json_output(args.json_logs)
        .with_log_level(if args.verbose { "debug" } else { "info" });
    init_logging(&logger_config).context("failed to initialize logging")?;

    let mut config = AssistantConfig::from_env().context("invalid voice form configuration")?;
    if let Some(lang) = args.lang.as_deref() {
        config = config.with_language(Language::from_param(lang));
    }
    let language = config.default_language;

    info!(scheme = %args.scheme, %language, "Starting voice form session");

    let providers = create_provider(&config.speech_backend)?;
    let template = FormTemplate::standard_application();
    let assistant = VoiceFormAssistant::new(config, template.clone(), providers)
        .with_redactor(redactor_for(&logger_config));

    for field in template.fields() {
        let label = field_label(&field.name, language).unwrap_or(field.name.as_str());
        match assistant.fill_field(&field.name).await {
            Ok(FillOutcome::Filled { .. }) => {
                let progress = assistant.progress();
                println!("{label}: {}/{} ({:.0}%)", progress.completed, progress.total, progress.percentage());
            }
            Ok(FillOutcome::NoTranscript { .. }) => println!("{}", localized(Message::VoiceRetry, language)),
            Ok(FillOutcome::Cancelled { .. }) => {}
            Ok(FillOutcome::VoiceModeOff) => {
                warn!("Voice input disabled, nothing to do");
                break;
            }
            Err(e @ (FormError::RecognitionUnavailable(_) | FormError::RecognitionDenied(_))) => {
                println!("{}", e.user_message(language));
                break;
            }
            Err(e) if e.is_user_facing() => println!("{}", e.user_message(language)),
            Err(e) => return Err(e.into()),
        }
    }

    let state = assistant.form_state();
    let mut session = FormSession::new(
        args.scheme,
        language,
        template,
        Arc::new(InMemoryFormStore::new()),
    );

    let draft = session.save_draft(&state).await?;
    println!("{}", localized(Message::DraftSaved, language));

    let submission = match session.submit(&state).await {
        Ok(submission) => {
            println!("{}", localized(Message::FormSubmitted, language));
            submission
        }
        Err(FormError::MissingRequired(missing)) => {
            println!("{}", localized(Message::MissingRequired, language));
            for name in &missing {
                println!("  - {}", field_label(name, language).unwrap_or(name.as_str()));
            }
            draft
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}
