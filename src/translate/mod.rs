//! Story translation: provider seam, validation, confidence scoring and
//! batch orchestration.

pub mod confidence;
pub mod cultural;
pub mod error;
pub mod factory;
pub mod google;
pub mod interface;
pub mod languages;
pub mod pacing;
pub mod service;
pub mod sidecar;
pub mod validator;

pub use error::{ErrorKind, ProviderError, TranslationError};
pub use factory::TranslatorFactory;
pub use interface::{Detection, LanguageInfo, TranslateInterface, TranslatedText};
pub use pacing::{BatchPacer, FixedDelayPacer, NoDelayPacer, TokenBucketPacer};
pub use service::{BatchResult, BatchSettings, TranslationOutcome, TranslationRequest, TranslationService};
pub use validator::{SpecialCharPolicy, ValidationResult};
