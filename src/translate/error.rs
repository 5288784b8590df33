use axum::http::StatusCode;
use thiserror::Error;

/// Failure categories a translation provider can report.
///
/// Computed once where the provider response is decoded, so nothing deeper in
/// the stack has to inspect status codes or message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    QuotaExceeded,
    InvalidRequest,
    Transport,
    Unknown,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 | 429 => ErrorKind::QuotaExceeded,
            400 => ErrorKind::InvalidRequest,
            500..=599 => ErrorKind::Transport,
            _ => ErrorKind::Unknown,
        }
    }
}

/// Error returned by a `TranslateInterface` implementation
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn from_status(status: u16, body: &str) -> Self {
        Self::new(
            ErrorKind::from_status(status),
            format!("provider returned status {}: {}", status, body),
        )
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => ProviderError::from_status(status.as_u16(), &error.to_string()),
            None if error.is_decode() => ProviderError::new(ErrorKind::Unknown, error.to_string()),
            None => ProviderError::new(ErrorKind::Transport, error.to_string()),
        }
    }
}

/// Errors surfaced by the translation service to its callers
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("At least one target language is required")]
    NoTargetLanguages,

    #[error("Authentication failed. Please check your translation provider credentials.")]
    Authentication { language: String, detail: String },

    #[error(
        "Translation API access denied. Please ensure the translation API is enabled, \
         the credentials have the necessary permissions, and the quota or billing limit \
         has not been reached."
    )]
    QuotaExceeded { language: String, detail: String },

    #[error("Invalid request. Please check the text and language codes.")]
    MalformedRequest { language: String, detail: String },

    #[error("Translation to {language} failed: {detail}")]
    Failed { language: String, detail: String },
}

impl TranslationError {
    /// Turn a provider failure for `language` into a caller-facing error
    pub fn classify(language: &str, error: ProviderError) -> Self {
        let language = language.to_string();
        let detail = error.message;
        match error.kind {
            ErrorKind::Unauthorized => TranslationError::Authentication { language, detail },
            ErrorKind::QuotaExceeded => TranslationError::QuotaExceeded { language, detail },
            ErrorKind::InvalidRequest => TranslationError::MalformedRequest { language, detail },
            ErrorKind::Transport | ErrorKind::Unknown => {
                TranslationError::Failed { language, detail }
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslationError::Validation(_)
            | TranslationError::NoTargetLanguages
            | TranslationError::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            TranslationError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            TranslationError::Authentication { .. } | TranslationError::Failed { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::QuotaExceeded);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::QuotaExceeded);
        assert_eq!(ErrorKind::from_status(400), ErrorKind::InvalidRequest);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Transport);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::Unknown);
    }

    #[test]
    fn test_classify_into_translation_error() {
        let err = TranslationError::classify("fr", ProviderError::new(ErrorKind::Unauthorized, "bad key"));
        assert!(matches!(err, TranslationError::Authentication { ref language, .. } if language == "fr"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = TranslationError::classify("de", ProviderError::from_status(403, "forbidden"));
        assert!(matches!(err, TranslationError::QuotaExceeded { .. }));

        let err = TranslationError::classify("es", ProviderError::new(ErrorKind::Transport, "connection reset"));
        assert_eq!(err.to_string(), "Translation to es failed: connection reset");
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = TranslationError::Validation(vec![
            "Text cannot be empty".to_string(),
            "Text is too short for reliable translation".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Text cannot be empty, Text is too short for reliable translation"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
