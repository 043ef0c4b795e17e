use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface and recognition language.
///
/// One recognition session never mixes languages; the language picks the
/// lexicon set, the prompt text and the recognizer locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];

    /// Parse a `lang` query parameter. Anything other than `hindi` means English.
    pub fn from_param(param: &str) -> Self {
        if param.trim().eq_ignore_ascii_case("hindi") {
            Language::Hindi
        } else {
            Language::English
        }
    }

    /// BCP 47 tag handed to the speech capabilities.
    pub fn locale_tag(self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
