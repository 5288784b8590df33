use axum::{
    extract::State,
    routing::{get, post},
    Router,
    Json,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;
use crate::translate::{TranslationError, TranslationRequest};

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/storytelling", storytelling_routes())
}

fn storytelling_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(translate_story))
        .route("/translate-text", post(translate_text))
        .route("/detect-language", post(detect_language))
        .route("/validate", post(validate_text))
        .route("/cultural-suggestions", post(cultural_suggestions))
        .route("/utils/supported-languages", get(supported_languages))
        .route("/utils/test-connection", get(test_connection))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "success": false,
            "message": message.into()
        })),
    )
}

fn translation_error_response(error: TranslationError) -> (StatusCode, Json<Value>) {
    error_response(error.status_code(), error.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateStoryBody {
    #[serde(default)]
    text: String,
    #[serde(default)]
    source_language: Option<String>,
    #[serde(default)]
    target_languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextBody {
    #[serde(default)]
    text: String,
    #[serde(default)]
    target_language: String,
    #[serde(default)]
    source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextBody {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CulturalBody {
    #[serde(default)]
    text: String,
    #[serde(default)]
    target_language: String,
}

/// Liveness only; the provider is not contacted
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "translator": state.config.translation_config.translator,
        "translation": "configured"
    }))
}

/// Round-trips a short translation through the provider, which uses quota
async fn test_connection(State(state): State<AppState>) -> Json<Value> {
    let connected = state.translation_service.test_connection().await;
    Json(json!({
        "success": true,
        "data": { "connected": connected }
    }))
}

async fn translate_story(
    State(state): State<AppState>,
    Json(body): Json<TranslateStoryBody>,
) -> ApiResult {
    if body.text.is_empty() || body.target_languages.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Text and target languages are required",
        ));
    }

    let service = &state.translation_service;

    let validation = service.validate_text(&body.text);
    if !validation.valid {
        return Err(translation_error_response(TranslationError::Validation(
            validation.errors,
        )));
    }

    info!("Translating story to {} languages", body.target_languages.len());

    let request = TranslationRequest {
        text: body.text,
        source_language: body.source_language.unwrap_or_else(|| "en".to_string()),
        target_languages: body.target_languages,
    };

    let result = service
        .batch_translate(&request)
        .await
        .map_err(translation_error_response)?;

    let created_at = chrono::Utc::now();
    let translations: Vec<Value> = result
        .outcomes
        .iter()
        .map(|t| {
            json!({
                "id": Uuid::new_v4().to_string(),
                "language": t.language,
                "languageName": t.language_name,
                "translatedText": t.translated_text,
                "confidence": t.confidence,
                "detectedSourceLanguage": t.detected_source_language,
                "createdAt": created_at,
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "translations": translations,
        "errors": result.errors
    })))
}

async fn translate_text(
    State(state): State<AppState>,
    Json(body): Json<TranslateTextBody>,
) -> ApiResult {
    if body.text.is_empty() || body.target_language.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Text and target language are required",
        ));
    }

    let outcome = state
        .translation_service
        .translate_text(&body.text, &body.target_language, body.source_language.as_deref())
        .await
        .map_err(translation_error_response)?;

    Ok(Json(json!({
        "originalText": body.text,
        "translation": outcome,
        "targetLanguage": body.target_language
    })))
}

async fn detect_language(
    State(state): State<AppState>,
    Json(body): Json<TextBody>,
) -> ApiResult {
    if body.text.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Text is required"));
    }

    let language = state.translation_service.detect_language(&body.text).await;
    Ok(Json(json!({
        "success": true,
        "data": { "language": language }
    })))
}

async fn validate_text(State(state): State<AppState>, Json(body): Json<TextBody>) -> Json<Value> {
    let result = state.translation_service.validate_text(&body.text);
    Json(json!(result))
}

async fn cultural_suggestions(
    State(state): State<AppState>,
    Json(body): Json<CulturalBody>,
) -> ApiResult {
    if body.target_language.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "targetLanguage is required"));
    }

    let suggestions = state
        .translation_service
        .cultural_suggestions(&body.text, &body.target_language);
    Ok(Json(json!({
        "success": true,
        "data": suggestions
    })))
}

async fn supported_languages(State(state): State<AppState>) -> Json<Value> {
    let languages = state.translation_service.supported_languages().await;
    Json(json!({
        "success": true,
        "data": languages
    }))
}
