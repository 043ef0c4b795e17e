use regex::Regex;
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use base64::{Engine as _, engine::general_purpose};

lazy_static! {
    static ref EMAIL_REGEX: Option<Regex> = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").ok();
    // 12 digits, optionally grouped 4-4-4
    static ref AADHAAR_REGEX: Option<Regex> = Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}\b").ok();
    // Indian mobile numbers start with 6-9, optional +91 prefix
    static ref MOBILE_REGEX: Option<Regex> = Regex::new(r"(?:\+?\b91[-\s]?)?\b[6-9]\d{9}\b").ok();
    static ref PIN_CODE_REGEX: Option<Regex> = Regex::new(r"\b[1-9]\d{5}\b").ok();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_mobile_numbers: bool,
    pub redact_aadhaar: bool,
    pub redact_pin_codes: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_mobile_numbers: true,
            redact_aadhaar: true,
            redact_pin_codes: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    /// Configuration that leaves every value untouched.
    pub fn disabled() -> Self {
        Self {
            redact_emails: false,
            redact_mobile_numbers: false,
            redact_aadhaar: false,
            redact_pin_codes: false,
            hash_for_correlation: false,
            custom_patterns: Vec::new(),
        }
    }

    pub fn with_custom_pattern(mut self, pattern: Regex, replacement: impl Into<String>) -> Self {
        self.custom_patterns.push((pattern, replacement.into()));
        self
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        // Aadhaar before mobile: a 12 digit run must not be read as +91 and a mobile number
        if self.config.redact_aadhaar {
            result = self.redact_aadhaar(&result);
        }

        if self.config.redact_mobile_numbers {
            result = self.redact_mobile_numbers(&result);
        }

        if self.config.redact_pin_codes {
            result = self.redact_pin_codes(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        let Some(regex) = EMAIL_REGEX.as_ref() else {
            return text.to_string();
        };
        regex.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*')
                    ),
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }

    fn redact_aadhaar(&self, text: &str) -> String {
        self.replace_with(AADHAAR_REGEX.as_ref(), text, "AADHAAR", |digits| {
            let tail: String = digits.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("XXXX-XXXX-{tail}")
        })
    }

    fn redact_mobile_numbers(&self, text: &str) -> String {
        self.replace_with(MOBILE_REGEX.as_ref(), text, "MOBILE", |_| "**********".to_string())
    }

    fn redact_pin_codes(&self, text: &str) -> String {
        self.replace_with(PIN_CODE_REGEX.as_ref(), text, "PIN", |_| "******".to_string())
    }

    fn replace_with(
        &self,
        regex: Option<&Regex>,
        text: &str,
        label: &str,
        mask: impl Fn(&str) -> String,
    ) -> String {
        let Some(regex) = regex else {
            return text.to_string();
        };
        regex.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("{label}[{}]", self.hash_value(&caps[0]))
            } else {
                mask(&caps[0])
            }
        }).to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD_NO_PAD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let redacted = masking_redactor().redact("mail john.doe@example.com please");
        assert_eq!(redacted, "mail j***@e*** please");
    }

    #[test]
    fn test_mobile_redaction() {
        let redacted = masking_redactor().redact("call 9876543210 now");
        assert_eq!(redacted, "call ********** now");
    }

    #[test]
    fn test_aadhaar_keeps_last_four() {
        let redacted = masking_redactor().redact("aadhaar 1234 5678 9012");
        assert_eq!(redacted, "aadhaar XXXX-XXXX-9012");
    }

    #[test]
    fn test_pin_code_redaction() {
        let redacted = masking_redactor().redact("pin 110001");
        assert_eq!(redacted, "pin ******");
    }

    #[test]
    fn test_hashes_are_stable_for_correlation() {
        let redactor = PiiRedactor::default();
        let first = redactor.redact("9876543210");
        let second = redactor.redact("9876543210");
        assert!(first.starts_with("MOBILE["));
        assert_eq!(first, second);
        assert_ne!(first, redactor.redact("9876543211"));
    }

    #[test]
    fn test_disabled_config_is_passthrough() {
        let redactor = PiiRedactor::new(RedactionConfig::disabled());
        let text = "Ramesh, 9876543210, ramesh@example.com, 110001";
        assert_eq!(redactor.redact(text), text);
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "Uttar-pradesh";
        assert_eq!(PiiRedactor::default().redact(text), text);
    }
}
