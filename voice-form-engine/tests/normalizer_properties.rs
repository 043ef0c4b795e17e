use proptest::prelude::*;

use voice_form_engine::{clean_text, normalize, normalize_detailed, FieldType, Language, Lexicon};

const FIELD_TYPES: [FieldType; 7] = [
    FieldType::Text,
    FieldType::Tel,
    FieldType::Number,
    FieldType::Email,
    FieldType::Date,
    FieldType::Textarea,
    FieldType::Select,
];

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FIELD_TYPES.to_vec())
}

fn language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

#[test]
fn test_every_number_word_maps_to_its_digits() {
    for language in Language::ALL {
        for &(word, digits) in Lexicon::number_words(language) {
            assert_eq!(normalize(word, FieldType::Number, language, None), digits, "{language}: {word}");
            assert_eq!(
                normalize(&word.to_uppercase(), FieldType::Tel, language, None),
                digits,
                "{language}: {word} upper-cased"
            );
        }
    }
}

#[test]
fn test_every_state_variant_resolves() {
    for language in Language::ALL {
        for &(spoken, code) in Lexicon::state_names(language) {
            assert_eq!(normalize(spoken, FieldType::Select, language, Some("state")), code, "{spoken}");
        }
    }
}

#[test]
fn test_every_month_name_in_a_date() {
    for language in Language::ALL {
        for &(month, code) in Lexicon::month_names(language) {
            let spoken = format!("5 {month} 2001");
            assert_eq!(
                normalize(&spoken, FieldType::Date, language, None),
                format!("2001-{code}-05"),
                "{spoken}"
            );
        }
    }
}

proptest! {
    #[test]
    fn prop_normalize_is_total_and_deterministic(
        transcript in any::<String>(),
        field_type in field_type(),
        language in language(),
        state_field in any::<bool>(),
    ) {
        let name = state_field.then_some("state");
        let first = normalize(&transcript, field_type, language, name);
        let second = normalize(&transcript, field_type, language, name);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_number_is_digits_or_untouched(transcript in any::<String>(), language in language()) {
        let result = normalize_detailed(&transcript, FieldType::Number, language, None);
        if result.is_fallback() {
            prop_assert_eq!(result.value, transcript);
        } else {
            prop_assert!(!result.value.is_empty());
            prop_assert!(result.value.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn prop_digit_strings_pass_through(digits in "[0-9]{1,12}", language in language()) {
        prop_assert_eq!(normalize(&digits, FieldType::Tel, language, None), digits);
    }

    #[test]
    fn prop_date_is_iso_shaped_or_untouched(transcript in any::<String>(), language in language()) {
        let result = normalize_detailed(&transcript, FieldType::Date, language, None);
        if result.is_fallback() {
            prop_assert_eq!(result.value, transcript);
        } else {
            let parts: Vec<&str> = result.value.split('-').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(parts[0].len(), 4);
            prop_assert!(parts[1].len() >= 2);
            prop_assert!(parts[2].len() >= 2);
        }
    }

    #[test]
    fn prop_numeric_dates(day in 1u32..=31, month in 1u32..=12, year in 1900u32..=2099, sep in "[/ -]") {
        let spoken = format!("{day}{sep}{month}{sep}{year}");
        prop_assert_eq!(
            normalize(&spoken, FieldType::Date, Language::English, None),
            format!("{year}-{month:02}-{day:02}")
        );
    }

    #[test]
    fn prop_email_has_no_whitespace(transcript in any::<String>()) {
        let email = normalize(&transcript, FieldType::Email, Language::English, None);
        prop_assert!(!email.chars().any(char::is_whitespace));
    }

    #[test]
    fn prop_clean_text_is_idempotent_on_ascii(text in "[a-zA-Z ]{0,40}") {
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn prop_state_codes_are_fixed_points(
        index in any::<prop::sample::Index>(),
        language in language(),
    ) {
        let entries = Lexicon::state_names(Language::English);
        let (_, code) = entries[index.index(entries.len())];
        prop_assert_eq!(normalize(code, FieldType::Select, language, Some("state")), code);
    }
}
