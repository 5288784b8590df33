use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// Wire request understood by the translation sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: Option<String>,
    pub target_lang: String,
}

/// Wire response returned by the translation sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub success: bool,
    #[serde(default)]
    pub detected_source_lang: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Text produced by a provider for one target language
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedText {
    pub translated_text: String,
    pub detected_source_language: Option<String>,
}

/// Result of provider-side language detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub language: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

/// Machine translation provider.
///
/// Implementations classify their own failures into `ProviderError` kinds;
/// callers never look at transport details.
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate `text` into `target_lang`
    ///
    /// # Arguments
    /// * `text` - Source text
    /// * `target_lang` - ISO code of the wanted language
    /// * `source_lang` - ISO code of the source, `None` to let the provider detect it
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<TranslatedText, ProviderError>;

    /// Detect the language of `text`
    async fn detect_language(&self, text: &str) -> Result<Detection, ProviderError>;

    /// Languages the provider can translate into
    async fn list_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError>;
}
