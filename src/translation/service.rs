use crate::i18n::{Language, MetricsReport, TranslationMetrics};
use crate::translation::model::{CacheEntry, CacheKey, ContentType};
use crate::translation::provider::{ProviderError, TranslationProvider};
use crate::translation::store::TranslationStore;
use anyhow::{Context, Result};
use futures::future::join_all;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Cache-aside translation of content fields.
///
/// Translation is best effort: every public method except `clear_cache`
/// falls back to the original text instead of returning an error.
#[derive(Clone)]
pub struct TranslationService {
    provider: Arc<dyn TranslationProvider>,
    store: Arc<dyn TranslationStore>,
    metrics: Arc<TranslationMetrics>,
    verify_source_text: bool,
}

impl TranslationService {
    pub fn new(provider: Arc<dyn TranslationProvider>, store: Arc<dyn TranslationStore>) -> Self {
        Self {
            provider,
            store,
            metrics: Arc::new(TranslationMetrics::new()),
            verify_source_text: true,
        }
    }

    /// When enabled, a cached entry whose source text no longer matches the
    /// caller's text is re-translated instead of served.
    pub fn with_source_verification(mut self, enabled: bool) -> Self {
        self.verify_source_text = enabled;
        self
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    /// Translate a single field of one content item.
    pub async fn translate_field(
        &self,
        content_type: ContentType,
        content_id: i32,
        field_name: &str,
        original_text: &str,
        target_language: &str,
    ) -> String {
        if target_language == Language::canonical().code() || original_text.trim().is_empty() {
            return original_text.to_string();
        }

        let key = CacheKey::new(content_type, content_id, field_name, target_language);

        match self.store.get(&key).await {
            Ok(Some(entry)) => {
                if !self.verify_source_text || entry.original_text == original_text {
                    self.metrics.record_cache_hit();
                    debug!("Translation cache hit for {}", key);
                    return entry.translated_text;
                }
                self.metrics.record_stale_entry();
                debug!("Source text changed for {}, re-translating", key);
            }
            Ok(None) => {
                debug!("Translation cache miss for {}", key);
            }
            Err(e) => {
                self.metrics.record_cache_read_failure();
                error!("Translation cache lookup failed for {}: {:#}", key, e);
            }
        }
        self.metrics.record_cache_miss();

        match self.call_provider(original_text, target_language).await {
            Some(translated) => {
                self.spawn_cache_write(CacheEntry::new(key, original_text, &translated));
                translated
            }
            None => original_text.to_string(),
        }
    }

    /// Translate every field of one content item concurrently.
    ///
    /// String values are translated; any other JSON value is returned as is.
    /// The result always has exactly the keys of `fields`.
    pub async fn translate_fields(
        &self,
        content_type: ContentType,
        content_id: i32,
        fields: &Map<String, Value>,
        target_language: &str,
    ) -> Map<String, Value> {
        let tasks = fields.iter().map(|(name, value)| async move {
            let translated = match value {
                Value::String(text) => Value::String(
                    self.translate_field(content_type, content_id, name, text, target_language)
                        .await,
                ),
                other => other.clone(),
            };
            (name.clone(), translated)
        });

        join_all(tasks).await.into_iter().collect()
    }

    /// Drop all cached translations for one content item.
    ///
    /// Best effort against cache writes still in flight: a translation
    /// computed before the clear may be written back after it.
    pub async fn clear_cache(&self, content_type: ContentType, content_id: i32) -> Result<u64> {
        self.store
            .clear_for_content(content_type, content_id)
            .await
            .with_context(|| {
                format!(
                    "Failed to clear translation cache for {}/{}",
                    content_type, content_id
                )
            })
    }

    /// Returns `None` when the provider could not translate the text.
    async fn call_provider(&self, text: &str, target_language: &str) -> Option<String> {
        self.metrics.record_api_call();

        match self.provider.translate(text, target_language).await {
            Ok(translated) => Some(translated),
            Err(ProviderError::MissingCredential) => {
                self.metrics.record_api_failure();
                warn!(
                    "Translation API key not configured, serving original text for {}",
                    target_language
                );
                None
            }
            Err(e) => {
                self.metrics.record_api_failure();
                error!("Translation to {} failed: {}", target_language, e);
                None
            }
        }
    }

    fn spawn_cache_write(&self, entry: CacheEntry) {
        let store = Arc::clone(&self.store);
        let metrics = Arc::clone(&self.metrics);

        tokio::spawn(async move {
            if let Err(e) = store.put(&entry).await {
                metrics.record_cache_write_failure();
                error!("Failed to cache translation for {}: {:#}", entry.key, e);
            }
        });
    }
}
