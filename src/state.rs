use std::sync::Arc;

use crate::config_manager::Config;
use crate::translate::{TranslationService, TranslatorFactory};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translation_service: Arc<TranslationService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translation_service = TranslatorFactory::create_service(&config.translation_config)?;
        Ok(Self::with_service(config, translation_service))
    }

    /// Build state around an already constructed service
    pub fn with_service(config: Config, translation_service: TranslationService) -> Self {
        Self {
            config: Arc::new(config),
            translation_service: Arc::new(translation_service),
        }
    }
}
