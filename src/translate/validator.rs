use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MIN_TEXT_LENGTH: usize = 3;
pub const MAX_TEXT_LENGTH: usize = 30_000;
const MAX_SPECIAL_CHAR_RATIO: f64 = 0.3;

// `\w` in the ASCII class is limited to [A-Za-z0-9_]; whitespace is Unicode in both.
const ASCII_SPECIAL_PATTERN: &str = r#"[^A-Za-z0-9_\s.,!?;:'"-]"#;
// Zero-width (non-)joiners shape Indic conjuncts and are part of the word.
const UNICODE_SPECIAL_PATTERN: &str = r#"[^\p{L}\p{N}\p{M}\s\x{200C}\x{200D}.,!?;:'"_-]"#;

static ASCII_SPECIAL: OnceLock<Regex> = OnceLock::new();
static UNICODE_SPECIAL: OnceLock<Regex> = OnceLock::new();

/// How characters are judged when computing the special-character ratio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCharPolicy {
    /// Only ASCII letters, digits, whitespace and basic punctuation count as text.
    /// Any non-Latin script is reported as special characters.
    AsciiWhitelist,
    /// Letters, digits and combining marks of every script count as text.
    ///
    /// Deliberately looser than the legacy ASCII whitelist, which rejects
    /// Hindi, Chinese and most other non-Latin stories. Whether this stays
    /// the default is still pending a product-owner decision; set
    /// `special_char_policy: ascii_whitelist` to restore the legacy rule.
    #[default]
    UnicodeAware,
}

impl SpecialCharPolicy {
    fn pattern(self) -> &'static Regex {
        let (cell, source) = match self {
            SpecialCharPolicy::AsciiWhitelist => (&ASCII_SPECIAL, ASCII_SPECIAL_PATTERN),
            SpecialCharPolicy::UnicodeAware => (&UNICODE_SPECIAL, UNICODE_SPECIAL_PATTERN),
        };
        cell.get_or_init(|| Regex::new(source).expect("special character class is a valid regex"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check that `text` is worth sending to a translation provider.
///
/// All rules are evaluated so the caller sees every problem at once.
pub fn validate_text(text: &str, policy: SpecialCharPolicy) -> ValidationResult {
    let mut errors = Vec::new();
    let length = text.chars().count();

    if text.trim().is_empty() {
        errors.push("Text cannot be empty".to_string());
    }

    if length > MAX_TEXT_LENGTH {
        errors.push("Text exceeds maximum length of 30,000 characters".to_string());
    }

    if length < MIN_TEXT_LENGTH {
        errors.push("Text is too short for reliable translation".to_string());
    }

    if special_char_ratio(text, policy) > MAX_SPECIAL_CHAR_RATIO {
        errors.push("Text contains too many special characters or markup".to_string());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// Share of characters in `text` that `policy` considers markup or symbols
pub fn special_char_ratio(text: &str, policy: SpecialCharPolicy) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let special = policy.pattern().find_iter(text).count();
    special as f64 / total as f64
}
