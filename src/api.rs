use crate::i18n::{Language, MetricsReport};
use crate::security::is_authorized;
use crate::translation::{ContentType, TranslationService};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const API_KEY_HEADER: &str = "x-api-key";

pub struct AppState {
    pub service: TranslationService,
    pub api_key: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid or missing API key")]
    Unauthorized,

    #[error("Cache administration is disabled: no API key configured")]
    AdminDisabled,

    #[error("Internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::AdminDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub content_type: String,
    pub content_id: i64,
    pub fields: Map<String, Value>,
    pub target_language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub content_type: ContentType,
    pub content_id: i32,
    pub language: Language,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub canonical: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub deleted: u64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(list_languages))
        .route("/api/translate", post(translate))
        .route("/api/translate/metrics", get(metrics))
        .route(
            "/api/translate/:content_type/:content_id",
            delete(clear_cache),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_languages() -> Json<Vec<LanguageInfo>> {
    let languages = Language::all_enabled()
        .into_iter()
        .map(|lang| LanguageInfo {
            code: lang.code(),
            name: lang.name(),
            native_name: lang.native_name(),
            canonical: lang.is_canonical(),
        })
        .collect();
    Json(languages)
}

async fn translate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    let content_type = parse_content_type(&request.content_type)?;
    let content_id = parse_content_id(request.content_id)?;
    let language = Language::from_code(&request.target_language)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let fields = state
        .service
        .translate_fields(content_type, content_id, &request.fields, language.code())
        .await;

    Ok(Json(TranslateResponse {
        content_type,
        content_id,
        language,
        fields,
    }))
}

async fn clear_cache(
    State(state): State<Arc<AppState>>,
    Path((content_type, content_id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Result<Json<ClearCacheResponse>, AppError> {
    let configured = state.api_key.as_deref().ok_or(AppError::AdminDisabled)?;
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if !is_authorized(Some(configured), presented) {
        return Err(AppError::Unauthorized);
    }

    let content_type = parse_content_type(&content_type)?;
    let content_id = parse_content_id(content_id)?;

    let deleted = state.service.clear_cache(content_type, content_id).await?;
    info!(
        "Cleared {} cached translations for {}/{}",
        deleted, content_type, content_id
    );

    Ok(Json(ClearCacheResponse { deleted }))
}

async fn metrics(State(state): State<Arc<AppState>>) -> Json<MetricsReport> {
    Json(state.service.metrics())
}

fn parse_content_type(tag: &str) -> Result<ContentType, AppError> {
    tag.parse::<ContentType>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_content_id(id: i64) -> Result<i32, AppError> {
    i32::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid content id: {}", id)))
}
