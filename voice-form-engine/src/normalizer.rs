//! Transcript normalization
//!
//! Turns one recognized utterance into the value stored for a form field.
//! Every function here is pure and total: the same `(transcript, field type,
//! language)` triple always yields the same string, and no input makes a
//! normalizer fail. When a transcript cannot be interpreted the result is a
//! cleaned or untouched copy of the input, flagged as a fallback.

use lazy_static::lazy_static;
use regex::Regex;

use crate::form::FieldType;
use crate::language::Language;
use crate::lexicon::Lexicon;

/// The only field name routed through the state lexicon.
pub const STATE_FIELD: &str = "state";

lazy_static! {
    static ref SPOKEN_AT: Option<Regex> = Regex::new(r"\s+at\s+").ok();
    static ref SPOKEN_DOT: Option<Regex> = Regex::new(r"\s+dot\s+").ok();
    static ref WHITESPACE: Option<Regex> = Regex::new(r"\s+").ok();
    static ref DIGIT_RUN: Option<Regex> = Regex::new(r"[0-9]+").ok();
    static ref SEPARATED_DATE: Option<Regex> =
        Regex::new(r"([0-9]{1,2})[/\-\s]([0-9]{1,2})[/\-\s]([0-9]{4})").ok();
}

/// How a normalizer arrived at its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationOutcome {
    Interpreted,
    /// Input not understood; value is the cleaned or raw transcript.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub value: String,
    pub outcome: NormalizationOutcome,
}

impl Normalized {
    fn interpreted(value: String) -> Self {
        Self { value, outcome: NormalizationOutcome::Interpreted }
    }

    fn fallback(value: String) -> Self {
        Self { value, outcome: NormalizationOutcome::Fallback }
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == NormalizationOutcome::Fallback
    }
}

/// Normalize `transcript` for a field of `field_type`.
///
/// A field named exactly `"state"` goes through the state lexicon whatever its
/// declared type.
pub fn normalize(
    transcript: &str,
    field_type: FieldType,
    language: Language,
    field_name: Option<&str>,
) -> String {
    normalize_detailed(transcript, field_type, language, field_name).value
}

/// Same as [`normalize`], keeping track of whether the input was understood.
pub fn normalize_detailed(
    transcript: &str,
    field_type: FieldType,
    language: Language,
    field_name: Option<&str>,
) -> Normalized {
    if field_name == Some(STATE_FIELD) {
        return normalize_state(transcript, language);
    }

    match field_type {
        FieldType::Number | FieldType::Tel => normalize_number(transcript, language),
        FieldType::Email => normalize_email(transcript),
        FieldType::Date => normalize_date(transcript, language),
        FieldType::Text | FieldType::Textarea | FieldType::Select => {
            Normalized::interpreted(clean_text(transcript))
        }
    }
}

/// Expand number words, then keep only the digits.
///
/// Falls back to the untouched transcript when no digit survives, so "no
/// usable signal" stays distinguishable from a genuinely empty value.
pub fn normalize_number(transcript: &str, language: Language) -> Normalized {
    let lowered = fold_digits(&transcript.to_lowercase());
    let expanded = Lexicon::substitute_numbers(&lowered, language);
    let digits: String = expanded.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        Normalized::fallback(transcript.to_string())
    } else {
        Normalized::interpreted(digits)
    }
}

/// Spoken email: `" at "` becomes `@`, `" dot "` becomes `.`, whitespace goes.
///
/// The resulting address is not validated.
pub fn normalize_email(transcript: &str) -> Normalized {
    let mut email = transcript.trim().to_lowercase();
    if let Some(at) = SPOKEN_AT.as_ref() {
        email = at.replace_all(&email, "@").into_owned();
    }
    if let Some(dot) = SPOKEN_DOT.as_ref() {
        email = dot.replace_all(&email, ".").into_owned();
    }
    if let Some(ws) = WHITESPACE.as_ref() {
        email = ws.replace_all(&email, "").into_owned();
    }
    Normalized::interpreted(email)
}

/// Spoken date to `YYYY-MM-DD`.
///
/// Month names become month codes, then the first three digit runs are read
/// as day, month, year when the third run has exactly four digits. Failing
/// that, a `D/M/YYYY` shape (separators `/`, `-` or whitespace) is tried on
/// the lowered text. Day and month ranges are not checked.
pub fn normalize_date(transcript: &str, language: Language) -> Normalized {
    let lowered = fold_digits(transcript.to_lowercase().trim());
    let with_months = Lexicon::substitute_months(&lowered, language);

    if let Some(date) = date_from_runs(&with_months) {
        return Normalized::interpreted(date);
    }

    let separated = SEPARATED_DATE.as_ref().and_then(|re| re.captures(&lowered));
    if let Some(caps) = separated {
        if let (Some(day), Some(month), Some(year)) = (caps.get(1), caps.get(2), caps.get(3)) {
            return Normalized::interpreted(compose_date(day.as_str(), month.as_str(), year.as_str()));
        }
    }

    Normalized::fallback(transcript.to_string())
}

fn date_from_runs(text: &str) -> Option<String> {
    let mut runs = DIGIT_RUN.as_ref()?.find_iter(text).map(|m| m.as_str());
    let day = runs.next()?;
    let month = runs.next()?;
    let year = runs.next()?;
    (year.len() == 4).then(|| compose_date(day, month, year))
}

fn compose_date(day: &str, month: &str, year: &str) -> String {
    format!("{year}-{month:0>2}-{day:0>2}")
}

/// Resolve a spoken state name to its canonical code.
///
/// Exact match on any variant (or on a canonical code) wins. Otherwise the
/// first containment match in either direction, scanning longest keys first.
/// Short keys can match inside unrelated words ("up" in "udupi"); that is
/// accepted in exchange for tolerating noisy transcripts.
pub fn normalize_state(transcript: &str, language: Language) -> Normalized {
    let input = transcript.trim().to_lowercase();
    if input.is_empty() {
        return Normalized::fallback(clean_text(transcript));
    }

    if Lexicon::is_state_code(&input) {
        return Normalized::interpreted(input);
    }

    let entries = Lexicon::state_names(language);
    if let Some(&(_, code)) = entries.iter().find(|(spoken, _)| *spoken == input) {
        return Normalized::interpreted(code.to_string());
    }

    let partial = Lexicon::state_containment_order(language)
        .iter()
        .find(|(spoken, _)| input.contains(spoken) || spoken.contains(input.as_str()));
    if let Some(&(_, code)) = partial {
        return Normalized::interpreted(code.to_string());
    }

    Normalized::fallback(clean_text(transcript))
}

/// Single sentence-cased line: trimmed, whitespace collapsed, lower-cased,
/// first character upper-cased.
pub fn clean_text(transcript: &str) -> String {
    let collapsed = transcript.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = collapsed.to_lowercase();

    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Devanagari digits (०-९) to ASCII so hi-IN transcripts feed the same digit scans.
fn fold_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0966}'..='\u{096F}' => {
                char::from_digit(u32::from(c) - 0x0966, 10).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}
