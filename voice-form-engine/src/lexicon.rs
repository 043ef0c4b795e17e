//! Spoken-word lexicons for voice form input
//!
//! Static per-language tables mapping spoken tokens to canonical tokens:
//! number words to digit strings, month names to two-digit month codes and
//! state-name variants to machine-readable state codes. Keys are lower-case;
//! matching is case-insensitive. Tables are built once and never mutated.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use crate::language::Language;

/// A `(spoken token, canonical token)` pair.
pub type LexiconEntry = (&'static str, &'static str);

const ENGLISH_NUMBER_WORDS: &[LexiconEntry] = &[
    ("zero", "0"), ("one", "1"), ("two", "2"), ("three", "3"), ("four", "4"),
    ("five", "5"), ("six", "6"), ("seven", "7"), ("eight", "8"), ("nine", "9"),
    ("ten", "10"), ("eleven", "11"), ("twelve", "12"), ("thirteen", "13"),
    ("fourteen", "14"), ("fifteen", "15"), ("sixteen", "16"), ("seventeen", "17"),
    ("eighteen", "18"), ("nineteen", "19"), ("twenty", "20"), ("thirty", "30"),
    ("forty", "40"), ("fifty", "50"), ("sixty", "60"), ("seventy", "70"),
    ("eighty", "80"), ("ninety", "90"), ("hundred", "00"), ("thousand", "000"),
    ("lakh", "00000"), ("crore", "0000000"),
];

// Nukta letters appear both precomposed and as base + U+093C depending on the recognizer.
const HINDI_NUMBER_WORDS: &[LexiconEntry] = &[
    ("शून्य", "0"), ("एक", "1"), ("दो", "2"), ("तीन", "3"), ("चार", "4"),
    ("पांच", "5"), ("पाँच", "5"), ("छह", "6"), ("छः", "6"), ("सात", "7"),
    ("आठ", "8"), ("नौ", "9"), ("दस", "10"), ("ग्यारह", "11"), ("बारह", "12"),
    ("तेरह", "13"), ("चौदह", "14"), ("पंद्रह", "15"), ("सोलह", "16"),
    ("सत्रह", "17"), ("अठारह", "18"), ("उन्नीस", "19"), ("बीस", "20"),
    ("तीस", "30"), ("चालीस", "40"), ("पचास", "50"), ("साठ", "60"),
    ("सत्तर", "70"), ("अस्सी", "80"), ("नब्बे", "90"), ("सौ", "00"),
    ("हजार", "000"), ("हज\u{091C}\u{093C}ार", "000"), ("हज\u{095B}ार", "000"),
    ("लाख", "00000"), ("करो\u{0921}\u{093C}", "0000000"), ("करो\u{095C}", "0000000"),
];

const ENGLISH_MONTH_NAMES: &[LexiconEntry] = &[
    ("january", "01"), ("jan", "01"),
    ("february", "02"), ("feb", "02"),
    ("march", "03"), ("mar", "03"),
    ("april", "04"), ("apr", "04"),
    ("may", "05"),
    ("june", "06"), ("jun", "06"),
    ("july", "07"), ("jul", "07"),
    ("august", "08"), ("aug", "08"),
    ("september", "09"), ("sept", "09"), ("sep", "09"),
    ("october", "10"), ("oct", "10"),
    ("november", "11"), ("nov", "11"),
    ("december", "12"), ("dec", "12"),
];

const HINDI_MONTH_NAMES: &[LexiconEntry] = &[
    ("जनवरी", "01"),
    ("फरवरी", "02"), ("फ\u{093C}रवरी", "02"), ("\u{095E}रवरी", "02"),
    ("मार्च", "03"),
    ("अप्रैल", "04"), ("अप्रेल", "04"),
    ("मई", "05"),
    ("जून", "06"),
    ("जुलाई", "07"),
    ("अगस्त", "08"),
    ("सितंबर", "09"), ("सितम्बर", "09"),
    ("अक्टूबर", "10"), ("अक्तूबर", "10"),
    ("नवंबर", "11"), ("नवम्बर", "11"),
    ("दिसंबर", "12"), ("दिसम्बर", "12"),
];

const ENGLISH_STATE_NAMES: &[LexiconEntry] = &[
    ("andhra pradesh", "andhra-pradesh"),
    ("arunachal pradesh", "arunachal-pradesh"),
    ("assam", "assam"),
    ("bihar", "bihar"),
    ("chhattisgarh", "chhattisgarh"),
    ("chattisgarh", "chhattisgarh"),
    ("goa", "goa"),
    ("gujarat", "gujarat"),
    ("haryana", "haryana"),
    ("himachal pradesh", "himachal-pradesh"),
    ("hp", "himachal-pradesh"),
    ("jharkhand", "jharkhand"),
    ("karnataka", "karnataka"),
    ("kerala", "kerala"),
    ("madhya pradesh", "madhya-pradesh"),
    ("mp", "madhya-pradesh"),
    ("maharashtra", "maharashtra"),
    ("manipur", "manipur"),
    ("meghalaya", "meghalaya"),
    ("mizoram", "mizoram"),
    ("nagaland", "nagaland"),
    ("odisha", "odisha"),
    ("orissa", "odisha"),
    ("punjab", "punjab"),
    ("rajasthan", "rajasthan"),
    ("sikkim", "sikkim"),
    ("tamil nadu", "tamil-nadu"),
    ("tamilnadu", "tamil-nadu"),
    ("telangana", "telangana"),
    ("tripura", "tripura"),
    ("uttar pradesh", "uttar-pradesh"),
    ("up", "uttar-pradesh"),
    ("uttarakhand", "uttarakhand"),
    ("uttaranchal", "uttarakhand"),
    ("west bengal", "west-bengal"),
    ("delhi", "delhi"),
    ("new delhi", "delhi"),
    ("jammu and kashmir", "jammu-kashmir"),
    ("jammu kashmir", "jammu-kashmir"),
    ("ladakh", "ladakh"),
    ("puducherry", "puducherry"),
    ("pondicherry", "puducherry"),
    ("chandigarh", "chandigarh"),
    ("andaman and nicobar islands", "andaman-nicobar"),
    ("andaman and nicobar", "andaman-nicobar"),
    ("lakshadweep", "lakshadweep"),
    ("dadra and nagar haveli", "dadra-nagar-haveli-daman-diu"),
    ("daman and diu", "dadra-nagar-haveli-daman-diu"),
];

const HINDI_STATE_NAMES: &[LexiconEntry] = &[
    ("आंध्र प्रदेश", "andhra-pradesh"),
    ("अरुणाचल प्रदेश", "arunachal-pradesh"),
    ("असम", "assam"),
    ("बिहार", "bihar"),
    ("छत्तीसग\u{0922}\u{093C}", "chhattisgarh"),
    ("छत्तीसग\u{095D}", "chhattisgarh"),
    ("गोवा", "goa"),
    ("गुजरात", "gujarat"),
    ("हरियाणा", "haryana"),
    ("हिमाचल प्रदेश", "himachal-pradesh"),
    ("झारखंड", "jharkhand"),
    ("झारखण्ड", "jharkhand"),
    ("कर्नाटक", "karnataka"),
    ("केरल", "kerala"),
    ("मध्य प्रदेश", "madhya-pradesh"),
    ("एमपी", "madhya-pradesh"),
    ("महाराष्ट्र", "maharashtra"),
    ("मणिपुर", "manipur"),
    ("मेघालय", "meghalaya"),
    ("मिजोरम", "mizoram"),
    ("मि\u{091C}\u{093C}ोरम", "mizoram"),
    ("नागालैंड", "nagaland"),
    ("ओडिशा", "odisha"),
    ("उ\u{0921}\u{093C}ीसा", "odisha"),
    ("उ\u{095C}ीसा", "odisha"),
    ("पंजाब", "punjab"),
    ("राजस्थान", "rajasthan"),
    ("सिक्किम", "sikkim"),
    ("तमिलनाडु", "tamil-nadu"),
    ("तमिल नाडु", "tamil-nadu"),
    ("तेलंगाना", "telangana"),
    ("त्रिपुरा", "tripura"),
    ("उत्तर प्रदेश", "uttar-pradesh"),
    ("यूपी", "uttar-pradesh"),
    ("उत्तराखंड", "uttarakhand"),
    ("उत्तराखण्ड", "uttarakhand"),
    ("पश्चिम बंगाल", "west-bengal"),
    ("दिल्ली", "delhi"),
    ("जम्मू और कश्मीर", "jammu-kashmir"),
    ("जम्मू कश्मीर", "jammu-kashmir"),
    ("लद्दाख", "ladakh"),
    ("पुडुचेरी", "puducherry"),
    ("चंडीग\u{0922}\u{093C}", "chandigarh"),
    ("चंडीग\u{095D}", "chandigarh"),
    ("अंडमान और निकोबार", "andaman-nicobar"),
    ("लक्षद्वीप", "lakshadweep"),
    ("दादरा और नगर हवेली", "dadra-nagar-haveli-daman-diu"),
    ("दमन और दीव", "dadra-nagar-haveli-daman-diu"),
];

/// Whole-word, case-insensitive substitution of one lexicon entry.
struct WordRule {
    pattern: Regex,
    canonical: &'static str,
}

fn compile_rules(entries: &'static [LexiconEntry]) -> Vec<WordRule> {
    // Escaped literals always compile; filter_map only satisfies the type.
    entries
        .iter()
        .filter_map(|&(spoken, canonical)| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(spoken)))
                .ok()
                .map(|pattern| WordRule { pattern, canonical })
        })
        .collect()
}

/// Longest key first; the stable sort keeps table order among equal lengths.
fn containment_order(entries: &'static [LexiconEntry]) -> Vec<LexiconEntry> {
    let mut ordered = entries.to_vec();
    ordered.sort_by_key(|(spoken, _)| std::cmp::Reverse(spoken.chars().count()));
    ordered
}

lazy_static! {
    static ref ENGLISH_NUMBER_RULES: Vec<WordRule> = compile_rules(ENGLISH_NUMBER_WORDS);
    static ref HINDI_NUMBER_RULES: Vec<WordRule> = compile_rules(HINDI_NUMBER_WORDS);
    static ref ENGLISH_MONTH_RULES: Vec<WordRule> = compile_rules(ENGLISH_MONTH_NAMES);
    static ref HINDI_MONTH_RULES: Vec<WordRule> = compile_rules(HINDI_MONTH_NAMES);
    static ref ENGLISH_STATE_CONTAINMENT: Vec<LexiconEntry> = containment_order(ENGLISH_STATE_NAMES);
    static ref HINDI_STATE_CONTAINMENT: Vec<LexiconEntry> = containment_order(HINDI_STATE_NAMES);
}

/// Per-language lexicon lookups.
pub struct Lexicon;

impl Lexicon {
    pub fn number_words(language: Language) -> &'static [LexiconEntry] {
        match language {
            Language::English => ENGLISH_NUMBER_WORDS,
            Language::Hindi => HINDI_NUMBER_WORDS,
        }
    }

    pub fn month_names(language: Language) -> &'static [LexiconEntry] {
        match language {
            Language::English => ENGLISH_MONTH_NAMES,
            Language::Hindi => HINDI_MONTH_NAMES,
        }
    }

    pub fn state_names(language: Language) -> &'static [LexiconEntry] {
        match language {
            Language::English => ENGLISH_STATE_NAMES,
            Language::Hindi => HINDI_STATE_NAMES,
        }
    }

    /// Replace every whole-word number word with its digit string.
    pub fn substitute_numbers(text: &str, language: Language) -> String {
        let rules: &[WordRule] = match language {
            Language::English => &ENGLISH_NUMBER_RULES,
            Language::Hindi => &HINDI_NUMBER_RULES,
        };
        substitute(text, rules)
    }

    /// Replace every whole-word month name with its two-digit month code.
    pub fn substitute_months(text: &str, language: Language) -> String {
        let rules: &[WordRule] = match language {
            Language::English => &ENGLISH_MONTH_RULES,
            Language::Hindi => &HINDI_MONTH_RULES,
        };
        substitute(text, rules)
    }

    /// State entries ordered for partial matching: longest spoken key first.
    pub fn state_containment_order(language: Language) -> &'static [LexiconEntry] {
        match language {
            Language::English => &ENGLISH_STATE_CONTAINMENT,
            Language::Hindi => &HINDI_STATE_CONTAINMENT,
        }
    }

    /// Whether `code` is one of the canonical state codes.
    pub fn is_state_code(code: &str) -> bool {
        ENGLISH_STATE_NAMES
            .iter()
            .chain(HINDI_STATE_NAMES)
            .any(|&(_, canonical)| canonical == code)
    }
}

fn substitute(text: &str, rules: &[WordRule]) -> String {
    let mut result = text.to_string();
    for rule in rules {
        if rule.pattern.is_match(&result) {
            result = rule.pattern.replace_all(&result, NoExpand(rule.canonical)).into_owned();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_compiles() {
        assert_eq!(ENGLISH_NUMBER_RULES.len(), ENGLISH_NUMBER_WORDS.len());
        assert_eq!(HINDI_NUMBER_RULES.len(), HINDI_NUMBER_WORDS.len());
        assert_eq!(ENGLISH_MONTH_RULES.len(), ENGLISH_MONTH_NAMES.len());
        assert_eq!(HINDI_MONTH_RULES.len(), HINDI_MONTH_NAMES.len());
    }

    #[test]
    fn test_keys_are_lowercase() {
        for language in Language::ALL {
            for table in [
                Lexicon::number_words(language),
                Lexicon::month_names(language),
                Lexicon::state_names(language),
            ] {
                for (spoken, _) in table {
                    assert_eq!(*spoken, spoken.to_lowercase());
                }
            }
        }
    }

    #[test]
    fn test_number_substitution_is_whole_word() {
        assert_eq!(Lexicon::substitute_numbers("seventeen", Language::English), "17");
        assert_eq!(Lexicon::substitute_numbers("someone", Language::English), "someone");
        assert_eq!(Lexicon::substitute_numbers("one ONE one", Language::English), "1 1 1");
    }

    #[test]
    fn test_hindi_substitution_respects_devanagari_boundaries() {
        assert_eq!(Lexicon::substitute_numbers("एक दो तीन", Language::Hindi), "1 2 3");
        // "दोनों" contains "दो" but is a different word
        assert_eq!(Lexicon::substitute_numbers("दोनों", Language::Hindi), "दोनों");
    }

    #[test]
    fn test_month_substitution() {
        assert_eq!(Lexicon::substitute_months("15 march 1990", Language::English), "15 03 1990");
        assert_eq!(Lexicon::substitute_months("1 Sept 2001", Language::English), "1 09 2001");
        assert_eq!(Lexicon::substitute_months("5 मई 1985", Language::Hindi), "5 05 1985");
    }

    #[test]
    fn test_containment_order_is_longest_first() {
        let order = Lexicon::state_containment_order(Language::English);
        let lengths: Vec<usize> = order.iter().map(|(k, _)| k.chars().count()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(order.len(), ENGLISH_STATE_NAMES.len());
    }

    #[test]
    fn test_state_codes() {
        assert!(Lexicon::is_state_code("uttar-pradesh"));
        assert!(Lexicon::is_state_code("odisha"));
        assert!(!Lexicon::is_state_code("orissa"));
    }
}
