use crate::config::ProviderConfig;
use crate::i18n::{Language, LanguageRegistry};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a provider call did not produce a translation.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("translation API credential is not configured")]
    MissingCredential,

    /// The wrapped error never carries the request URL.
    #[error("failed to send translation request: {0}")]
    Request(reqwest::Error),

    #[error("translation API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse translation response: {0}")]
    Parse(String),

    #[error("translation response contained no translations")]
    EmptyResponse,
}

/// An external service that translates English text.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from English into `target_language` (an internal code).
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, ProviderError>;
}

/// Google Cloud Translation v2 request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

const API_KEY_HEADER: &str = "x-goog-api-key";

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Request(e.without_url())
    }
}

/// Client for the Google Cloud Translation v2 REST API.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl GoogleTranslateClient {
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key,
            api_url: config.api_url,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        let request = TranslateRequest {
            q: text,
            source: Language::canonical().provider_code(),
            target: LanguageRegistry::get().provider_code(target_language),
            format: "text",
        };

        let response = self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: TranslateResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(ProviderError::EmptyResponse)
    }
}
