//! Google Cloud Translation (v2 REST) provider.
//!
//! Authenticates with an API key passed as the `key` query parameter.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use super::error::{ErrorKind, ProviderError};
use super::interface::{Detection, LanguageInfo, TranslateInterface, TranslatedText};

pub const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationItem {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
struct DetectionItem {
    language: String,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DetectionsData {
    detections: Vec<Vec<DetectionItem>>,
}

#[derive(Debug, Deserialize)]
struct LanguageItem {
    language: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguagesData {
    languages: Vec<LanguageItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Translator backed by the Google Cloud Translation API
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleTranslateClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::new(
                ErrorKind::Unauthorized,
                "Google Translate API key is empty",
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::new(ErrorKind::Unknown, format!("failed to build HTTP client: {}", e)))?;

        info!("Initialized GoogleTranslateClient: base_url={}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a successful body or turn the status into a classified error
    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::from_status(status.as_u16(), &message));
        }
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl TranslateInterface for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<TranslatedText, ProviderError> {
        let mut body = json!({
            "q": text,
            "target": target_lang,
            "format": "text",
        });
        if let Some(source) = source_lang {
            body["source"] = json!(source);
        }

        debug!("Sending Google translate request: target={}", target_lang);

        let response = self
            .client
            .post(self.url(""))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let data: TranslationsData = Self::decode(response).await?;
        let item = data.translations.into_iter().next().ok_or_else(|| {
            ProviderError::new(ErrorKind::Unknown, "response contained no translations")
        })?;

        Ok(TranslatedText {
            translated_text: item.translated_text,
            detected_source_language: item.detected_source_language,
        })
    }

    async fn detect_language(&self, text: &str) -> Result<Detection, ProviderError> {
        let response = self
            .client
            .post(self.url("/detect"))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "q": text }))
            .send()
            .await?;

        let data: DetectionsData = Self::decode(response).await?;
        let item = data
            .detections
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| ProviderError::new(ErrorKind::Unknown, "Could not detect language"))?;

        Ok(Detection {
            language: item.language,
            confidence: item.confidence,
        })
    }

    async fn list_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError> {
        let response = self
            .client
            .get(self.url("/languages"))
            .query(&[("key", self.api_key.as_str()), ("target", "en")])
            .send()
            .await?;

        let data: LanguagesData = Self::decode(response).await?;
        Ok(data
            .languages
            .into_iter()
            .map(|l| LanguageInfo {
                name: l.name.unwrap_or_else(|| l.language.clone()),
                code: l.language,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = GoogleTranslateClient::new(DEFAULT_BASE_URL.to_string(), "  ".to_string(), Duration::from_secs(5));
        match result {
            Err(e) => assert_eq!(e.kind, ErrorKind::Unauthorized),
            Ok(_) => panic!("empty key must be rejected"),
        }
    }

    #[test]
    fn test_translation_payload_decoding() {
        let raw = r#"{"data":{"translations":[{"translatedText":"Hola","detectedSourceLanguage":"en"}]}}"#;
        let envelope: Envelope<TranslationsData> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.translations[0].translated_text, "Hola");
        assert_eq!(
            envelope.data.translations[0].detected_source_language.as_deref(),
            Some("en")
        );
    }

    #[test]
    fn test_detection_payload_decoding() {
        let raw = r#"{"data":{"detections":[[{"language":"hi","confidence":0.92,"isReliable":false}]]}}"#;
        let envelope: Envelope<DetectionsData> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.detections[0][0].language, "hi");
    }

    #[test]
    fn test_error_payload_decoding() {
        let raw = r#"{"error":{"code":403,"message":"Cloud Translation API has not been used","errors":[]}}"#;
        let body: ErrorBody = serde_json::from_str(raw).unwrap();
        let err = ProviderError::from_status(403, &body.error.message);
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert!(err.message.contains("has not been used"));
    }
}
