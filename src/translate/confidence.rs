use std::collections::HashSet;

const BASE_CONFIDENCE: f64 = 0.85;
const MIN_CONFIDENCE: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 1.0;

/// Heuristic quality score in `[0.1, 1.0]` for `translated` as a rendering of `original`
pub fn estimate_confidence(original: &str, translated: &str) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    let original_len = original.chars().count();
    if original_len > 500 {
        confidence += 0.05;
    } else if original_len < 50 {
        confidence -= 0.1;
    }

    // 0/0 yields NaN which compares false, so an empty pair is not penalised here.
    let ratio = translated.chars().count() as f64 / original_len as f64;
    if ratio < 0.3 || ratio > 3.0 {
        confidence -= 0.15;
    }

    if has_translation_issues(original, translated) {
        confidence -= 0.1;
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Detect the usual symptoms of a broken machine translation
pub fn has_translation_issues(original: &str, translated: &str) -> bool {
    // Provider echoed the input back
    if original.to_lowercase() == translated.to_lowercase() {
        return true;
    }

    let words: Vec<String> = translated
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    if words.len() > 10 {
        let unique: HashSet<&String> = words.iter().collect();
        if (unique.len() as f64) / (words.len() as f64) < 0.5 {
            return true;
        }
    }

    translated.contains("&lt;") || translated.contains("&gt;") || translated.contains("&#")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_text_is_penalised() {
        let echoed = estimate_confidence("Hello world", "Hello world");
        let translated = estimate_confidence("Hello world", "Bonjour le monde");
        assert!(echoed < translated);
        assert!(approx(echoed, 0.65));
        assert!(approx(translated, 0.75));
    }

    #[test]
    fn test_long_source_bonus() {
        let original = "a".repeat(600);
        let translated = "b".repeat(650);
        assert!(approx(estimate_confidence(&original, &translated), 0.9));
    }

    #[test]
    fn test_mid_length_source_keeps_base() {
        let original = "x".repeat(100);
        let translated = "y".repeat(120);
        assert!(approx(estimate_confidence(&original, &translated), 0.85));
    }

    #[test]
    fn test_length_ratio_penalty() {
        let original = "x".repeat(100);
        assert!(approx(estimate_confidence(&original, &"y".repeat(20)), 0.7));
        assert!(approx(estimate_confidence(&original, &"y".repeat(400)), 0.7));
    }

    #[test]
    fn test_every_penalty_stacks() {
        let original = "Hi there";
        let translated = "&lt;b&gt;".repeat(10);
        // short source, ratio > 3, html entities
        assert!(approx(estimate_confidence(original, &translated), 0.5));
    }

    #[test]
    fn test_result_always_clamped() {
        let cases = [
            ("", ""),
            ("", "something"),
            ("a", ""),
            ("Hello world", "Hello world"),
            ("short", &"word ".repeat(200)),
        ];
        for (original, translated) in cases {
            let score = estimate_confidence(original, translated);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&score), "{} out of range", score);
        }
    }

    #[test]
    fn test_issue_detection() {
        assert!(has_translation_issues("Hello", "HELLO"));
        assert!(has_translation_issues("text", "a &#39; b"));
        assert!(has_translation_issues("text", "la la la la la la la la la la la la"));
        assert!(!has_translation_issues(
            "The craft is old",
            "El oficio es antiguo"
        ));
        // Ten words is not enough to judge repetition
        assert!(!has_translation_issues("text", "la la la la la la la la la la"));
    }
}
