use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::config_manager::translation::TranslationConfig;
use super::google::GoogleTranslateClient;
use super::interface::TranslateInterface;
use super::pacing::BatchPacer;
use super::service::TranslationService;
use super::sidecar::SidecarTranslateClient;

/// Factory for creating translation providers
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translation provider based on configuration
    ///
    /// # Arguments
    /// * `config` - Translation configuration from config manager
    ///
    /// # Returns
    /// Shared TranslateInterface implementation
    pub fn create_translator(config: &TranslationConfig) -> Result<Arc<dyn TranslateInterface>> {
        info!("Initializing translator: {}", config.translator);

        let timeout = config.request_timeout();

        match config.translator.as_str() {
            "google_translate" => {
                let google = config.google_translate.as_ref().ok_or_else(|| {
                    anyhow::anyhow!("translator is google_translate but google_translate config is missing")
                })?;
                let client = GoogleTranslateClient::new(
                    google.base_url.clone(),
                    google.api_key.clone(),
                    timeout,
                )?;
                Ok(Arc::new(client))
            }
            "sidecar" => {
                let base_url = config
                    .sidecar
                    .as_ref()
                    .map(|s| s.base_url.clone())
                    .unwrap_or_else(|| "http://localhost:8000".to_string());
                Ok(Arc::new(SidecarTranslateClient::new(base_url, timeout)?))
            }
            other => anyhow::bail!("Unknown translator: {}", other),
        }
    }

    /// Create the batch translation service with the configured provider and pacer
    pub fn create_service(config: &TranslationConfig) -> Result<TranslationService> {
        let translator = Self::create_translator(config)?;
        let pacer: Arc<dyn BatchPacer> = config.pacing.build_pacer()?;
        info!(
            "Batch settings: batch_size={}, pacing={:?}, policy={:?}",
            config.batch.batch_size, config.pacing.strategy, config.special_char_policy
        );
        Ok(TranslationService::new(translator, pacer, config.batch_settings()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_manager::translation::{GoogleTranslateConfig, SidecarConfig};

    #[test]
    fn test_google_requires_its_section() {
        let config = TranslationConfig::default();
        assert!(TranslatorFactory::create_translator(&config).is_err());
    }

    #[test]
    fn test_google_with_key() {
        let config = TranslationConfig {
            google_translate: Some(GoogleTranslateConfig {
                api_key: "test-key".to_string(),
                base_url: "http://localhost:1".to_string(),
            }),
            ..Default::default()
        };
        assert!(TranslatorFactory::create_service(&config).is_ok());
    }

    #[test]
    fn test_sidecar_and_unknown() {
        let config = TranslationConfig {
            translator: "sidecar".to_string(),
            sidecar: Some(SidecarConfig {
                base_url: "http://localhost:8000".to_string(),
            }),
            ..Default::default()
        };
        assert!(TranslatorFactory::create_translator(&config).is_ok());

        let config = TranslationConfig {
            translator: "babelfish".to_string(),
            ..Default::default()
        };
        assert!(TranslatorFactory::create_translator(&config).is_err());
    }
}
