use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::error::{ErrorKind, ProviderError};
use super::interface::{
    Detection, LanguageInfo, TranslateInterface, TranslateRequest, TranslateResponse,
    TranslatedText,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// Client for a translation sidecar speaking plain JSON over HTTP
#[derive(Debug, Clone)]
pub struct SidecarTranslateClient {
    client: Client,
    base_url: String,
}

impl SidecarTranslateClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::new(ErrorKind::Unknown, format!("failed to build HTTP client: {}", e)))?;

        info!("Initialized SidecarTranslateClient: base_url={}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::from_status(status.as_u16(), &body))
    }
}

#[async_trait]
impl TranslateInterface for SidecarTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<TranslatedText, ProviderError> {
        let url = format!("{}/translate", self.base_url);
        let request = TranslateRequest {
            text: text.to_string(),
            source_lang: source_lang.map(|s| s.to_string()),
            target_lang: target_lang.to_string(),
        };

        debug!("Sending sidecar translate request: target={}", target_lang);

        let response = self.client.post(&url).json(&request).send().await?;
        let result: TranslateResponse = Self::check_status(response).await?.json().await?;

        if result.success {
            Ok(TranslatedText {
                translated_text: result.translated_text,
                detected_source_language: result.detected_source_lang,
            })
        } else {
            let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
            error!("Sidecar translation failed: {}", error_msg);
            Err(ProviderError::new(ErrorKind::Unknown, error_msg))
        }
    }

    async fn detect_language(&self, text: &str) -> Result<Detection, ProviderError> {
        let url = format!("{}/detect", self.base_url);
        let request = DetectRequest {
            text: text.to_string(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let detection: Detection = Self::check_status(response).await?.json().await?;
        Ok(detection)
    }

    async fn list_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError> {
        let url = format!("{}/languages", self.base_url);
        let response = self.client.get(&url).send().await?;
        let languages: Vec<LanguageInfo> = Self::check_status(response).await?.json().await?;
        Ok(languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = TranslateRequest {
            text: "Handwoven silk".to_string(),
            source_lang: None,
            target_lang: "fr".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["target_lang"], "fr");
        assert!(value["source_lang"].is_null());
    }

    #[test]
    fn test_response_optional_fields() {
        let response: TranslateResponse =
            serde_json::from_str(r#"{"translated_text":"Soie tissée","success":true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.detected_source_lang, None);
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_unreachable_sidecar_is_transport_error() {
        let client = SidecarTranslateClient::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();
        let err = client.translate("Hello", "es", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
    }
}
