use super::interface::LanguageInfo;

/// Display names for the languages offered in the storytelling UI
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("bn", "Bengali"),
    ("ur", "Urdu"),
    ("tr", "Turkish"),
    ("pl", "Polish"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
];

/// Display name for `code`, or the code itself when unknown
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// The built-in language list, used when the provider cannot be asked
pub fn fallback_languages() -> Vec<LanguageInfo> {
    LANGUAGE_NAMES
        .iter()
        .map(|(code, name)| LanguageInfo {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(language_name("hi"), "Hindi");
        assert_eq!(language_name("no"), "Norwegian");
        assert_eq!(language_name("xx-invalid"), "xx-invalid");
    }

    #[test]
    fn test_fallback_list_matches_table() {
        let languages = fallback_languages();
        assert_eq!(languages.len(), 20);
        assert_eq!(languages[0].code, "en");
        assert!(languages.iter().all(|l| language_name(&l.code) == l.name));
    }
}
