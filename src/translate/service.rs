use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::confidence::estimate_confidence;
use super::cultural;
use super::error::{ErrorKind, ProviderError, TranslationError};
use super::interface::{LanguageInfo, TranslateInterface};
use super::languages::{fallback_languages, language_name};
use super::pacing::BatchPacer;
use super::validator::{self, SpecialCharPolicy, ValidationResult};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const FALLBACK_LANGUAGE: &str = "en";
const AUTO_SOURCE: &str = "auto";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutcome {
    pub language: String,
    pub language_name: String,
    pub translated_text: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
}

/// Successes and per-language failures of one batch call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub outcomes: Vec<TranslationOutcome>,
    pub errors: Vec<String>,
}

/// Tunables of the batch orchestrator
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Maximum number of provider calls in flight at once
    pub batch_size: usize,
    /// Upper bound for a single provider call
    pub request_timeout: Duration,
    pub special_char_policy: SpecialCharPolicy,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            special_char_policy: SpecialCharPolicy::default(),
        }
    }
}

/// Translates story text into many languages through an injected provider
pub struct TranslationService {
    translator: Arc<dyn TranslateInterface>,
    pacer: Arc<dyn BatchPacer>,
    settings: BatchSettings,
}

impl TranslationService {
    pub fn new(
        translator: Arc<dyn TranslateInterface>,
        pacer: Arc<dyn BatchPacer>,
        settings: BatchSettings,
    ) -> Self {
        let settings = BatchSettings {
            batch_size: settings.batch_size.max(1),
            ..settings
        };
        Self {
            translator,
            pacer,
            settings,
        }
    }

    /// Translate `text` into a single language.
    ///
    /// Provider failures are classified into actionable `TranslationError`s.
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Result<TranslationOutcome, TranslationError> {
        debug!("Translating text to {}", target_language);

        let source = source_language.filter(|s| !s.is_empty() && *s != AUTO_SOURCE);
        let call = self.translator.translate(text, target_language, source);

        let result = match tokio::time::timeout(self.settings.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::new(
                ErrorKind::Transport,
                format!("no response within {:?}", self.settings.request_timeout),
            )),
        };

        match result {
            Ok(translated) => {
                debug!("Translation to {} successful", target_language);
                let confidence = estimate_confidence(text, &translated.translated_text);
                Ok(TranslationOutcome {
                    language: target_language.to_string(),
                    language_name: language_name(target_language).to_string(),
                    translated_text: translated.translated_text,
                    confidence,
                    detected_source_language: translated
                        .detected_source_language
                        .or_else(|| source.map(|s| s.to_string())),
                })
            }
            Err(e) => {
                error!("Translation to {} failed: {}", target_language, e);
                Err(TranslationError::classify(target_language, e))
            }
        }
    }

    /// Translate one text into every requested language.
    ///
    /// Languages are dispatched in groups of `batch_size`; a group only starts
    /// once the previous one has fully settled and the pacer lets it through.
    /// A failing language is reported in `errors` and never stops the others.
    pub async fn batch_translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<BatchResult, TranslationError> {
        if request.target_languages.is_empty() {
            return Err(TranslationError::NoTargetLanguages);
        }

        let total = request.target_languages.len();
        info!("Starting batch translation to {} languages", total);

        let mut result = BatchResult::default();

        for (batch_index, batch) in request
            .target_languages
            .chunks(self.settings.batch_size)
            .enumerate()
        {
            self.pacer.before_batch(batch_index, batch.len()).await;

            let mut in_flight: FuturesUnordered<_> = batch
                .iter()
                .map(|target| async move {
                    let outcome = self
                        .translate_text(&request.text, target, Some(request.source_language.as_str()))
                        .await;
                    (target, outcome)
                })
                .collect();

            while let Some((target, outcome)) = in_flight.next().await {
                match outcome {
                    Ok(outcome) => result.outcomes.push(outcome),
                    Err(e) => result.errors.push(format!("{}: {}", target, e)),
                }
            }
        }

        if !result.errors.is_empty() {
            warn!("Some translations failed: {}", result.errors.join(", "));
        }

        info!(
            "Batch translation completed. {}/{} successful",
            result.outcomes.len(),
            total
        );

        Ok(result)
    }

    pub fn validate_text(&self, text: &str) -> ValidationResult {
        validator::validate_text(text, self.settings.special_char_policy)
    }

    /// Detect the language of `text`, falling back to English on any failure
    pub async fn detect_language(&self, text: &str) -> String {
        debug!("Detecting language for text");
        match self.translator.detect_language(text).await {
            Ok(detection) if !detection.language.is_empty() => {
                info!(
                    "Detected language: {} (confidence: {:?})",
                    detection.language, detection.confidence
                );
                detection.language
            }
            Ok(_) => {
                warn!("Language detection returned no language, using {}", FALLBACK_LANGUAGE);
                FALLBACK_LANGUAGE.to_string()
            }
            Err(e) => {
                warn!("Language detection failed: {}, using {}", e, FALLBACK_LANGUAGE);
                FALLBACK_LANGUAGE.to_string()
            }
        }
    }

    /// Provider language list, or the built-in list when the provider fails
    pub async fn supported_languages(&self) -> Vec<LanguageInfo> {
        match self.translator.list_languages().await {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Failed to get supported languages: {}", e);
                fallback_languages()
            }
        }
    }

    /// Check that the provider answers a trivial translation
    pub async fn test_connection(&self) -> bool {
        match self.translate_text("Hello", "es", None).await {
            Ok(outcome) => {
                debug!("Connection test translation: {}", outcome.translated_text);
                true
            }
            Err(e) => {
                warn!("Connection test failed: {}", e);
                false
            }
        }
    }

    pub fn cultural_suggestions(&self, text: &str, target_language: &str) -> Vec<String> {
        cultural::cultural_suggestions(text, target_language)
    }
}
