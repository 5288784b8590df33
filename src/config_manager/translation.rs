use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::translate::google::DEFAULT_BASE_URL as GOOGLE_DEFAULT_BASE_URL;
use crate::translate::pacing::{BatchPacer, FixedDelayPacer, NoDelayPacer, TokenBucketPacer};
use crate::translate::service::{BatchSettings, DEFAULT_BATCH_SIZE};
use crate::translate::validator::SpecialCharPolicy;

/// Configuration for Google Cloud Translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTranslateConfig {
    #[serde(rename = "api_key")]
    pub api_key: String,

    #[serde(rename = "base_url")]
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
}

fn default_google_base_url() -> String {
    GOOGLE_DEFAULT_BASE_URL.to_string()
}

/// Configuration for a translation sidecar service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarConfig {
    #[serde(rename = "base_url")]
    #[serde(default = "default_sidecar_url")]
    pub base_url: String,
}

fn default_sidecar_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(rename = "batch_size")]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(rename = "request_timeout_secs")]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingStrategy {
    #[default]
    FixedDelay,
    TokenBucket,
    None,
}

/// How batches are throttled against the provider rate limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default)]
    pub strategy: PacingStrategy,

    #[serde(rename = "delay_ms")]
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_capacity")]
    pub capacity: u32,

    /// Calls replenished per second; whole numbers only
    #[serde(rename = "refill_per_sec")]
    #[serde(default = "default_refill_per_sec")]
    pub refill_per_sec: u32,
}

fn default_delay_ms() -> u64 {
    100
}

fn default_capacity() -> u32 {
    DEFAULT_BATCH_SIZE as u32
}

fn default_refill_per_sec() -> u32 {
    10
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            strategy: PacingStrategy::default(),
            delay_ms: default_delay_ms(),
            capacity: default_capacity(),
            refill_per_sec: default_refill_per_sec(),
        }
    }
}

impl PacingConfig {
    pub fn build_pacer(&self) -> Result<Arc<dyn BatchPacer>> {
        let pacer: Arc<dyn BatchPacer> = match self.strategy {
            PacingStrategy::FixedDelay => {
                Arc::new(FixedDelayPacer::new(Duration::from_millis(self.delay_ms)))
            }
            PacingStrategy::TokenBucket => {
                let capacity = NonZeroU32::new(self.capacity)
                    .ok_or_else(|| anyhow::anyhow!("pacing.capacity must be at least 1"))?;
                let refill = NonZeroU32::new(self.refill_per_sec)
                    .ok_or_else(|| anyhow::anyhow!("pacing.refill_per_sec must be at least 1"))?;
                Arc::new(TokenBucketPacer::new(capacity, refill))
            }
            PacingStrategy::None => Arc::new(NoDelayPacer),
        };
        Ok(pacer)
    }
}

/// Configuration for story translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Provider name: "google_translate" or "sidecar"
    #[serde(rename = "translator")]
    #[serde(default = "default_translator")]
    pub translator: String,

    #[serde(rename = "google_translate")]
    #[serde(default)]
    pub google_translate: Option<GoogleTranslateConfig>,

    #[serde(default)]
    pub sidecar: Option<SidecarConfig>,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub pacing: PacingConfig,

    #[serde(rename = "special_char_policy")]
    #[serde(default)]
    pub special_char_policy: SpecialCharPolicy,
}

fn default_translator() -> String {
    "google_translate".to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            translator: default_translator(),
            google_translate: None,
            sidecar: None,
            batch: BatchConfig::default(),
            pacing: PacingConfig::default(),
            special_char_policy: SpecialCharPolicy::default(),
        }
    }
}

impl TranslationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.batch.request_timeout_secs)
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            batch_size: self.batch.batch_size,
            request_timeout: self.request_timeout(),
            special_char_policy: self.special_char_policy,
        }
    }
}
