/// Wording hints for adapting a craft story to the culture of `target_lang`
pub fn cultural_suggestions(text: &str, target_lang: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    if text.contains("pottery") && target_lang == "ja" {
        suggestions.push("Consider using \"陶芸\" (tōgei) for pottery in Japanese context".to_string());
    }

    if text.contains("weaving") && target_lang == "es" {
        suggestions.push(
            "Consider regional variations: \"tejeduría\" (formal) vs \"tejido\" (general)".to_string(),
        );
    }

    if target_lang == "ar" && text.contains("tradition") {
        suggestions.push("Consider emphasizing cultural heritage and family traditions".to_string());
    }

    if target_lang == "zh" && text.contains("handmade") {
        suggestions.push(
            "Emphasize the skill and artistry aspect, which is highly valued in Chinese culture"
                .to_string(),
        );
    }

    suggestions
}
