use crate::translation::model::{CacheEntry, CacheKey, ContentType};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Durable storage for translated fields.
///
/// `put` must be an upsert keyed by the full `CacheKey`: at most one entry
/// exists per key, and writing an existing key replaces its texts and
/// `updated_at`.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    async fn put(&self, entry: &CacheEntry) -> Result<()>;

    /// Remove every entry for one content item, returning how many were removed.
    async fn clear_for_content(&self, content_type: ContentType, content_id: i32) -> Result<u64>;
}

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("translation cache lock poisoned")
}

#[async_trait]
impl TranslationStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, entry: &CacheEntry) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(entry.key.clone(), entry.clone());
        Ok(())
    }

    async fn clear_for_content(&self, content_type: ContentType, content_id: i32) -> Result<u64> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|key, _| !(key.content_type == content_type && key.content_id == content_id));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content_id: i32, field: &str, language: &str, translated: &str) -> CacheEntry {
        CacheEntry::new(
            CacheKey::new(ContentType::Journey, content_id, field, language),
            "Sacred journey",
            translated,
        )
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        let key = CacheKey::new(ContentType::Journey, 1, "title", "fr");

        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        let e = entry(1, "title", "fr", "Voyage sacré");
        store.put(&e).await.unwrap();

        let found = store.get(&e.key).await.unwrap().expect("Should be cached");
        assert_eq!(found.translated_text, "Voyage sacré");
        assert_eq!(found.original_text, "Sacred journey");
    }

    #[tokio::test]
    async fn test_put_upserts_by_key() {
        let store = MemoryStore::new();
        store.put(&entry(1, "title", "fr", "first")).await.unwrap();
        store.put(&entry(1, "title", "fr", "second")).await.unwrap();

        assert_eq!(store.len(), 1);
        let key = CacheKey::new(ContentType::Journey, 1, "title", "fr");
        assert_eq!(store.get(&key).await.unwrap().unwrap().translated_text, "second");
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = MemoryStore::new();
        store.put(&entry(1, "title", "fr", "un")).await.unwrap();

        let other_id = CacheKey::new(ContentType::Journey, 2, "title", "fr");
        let other_type = CacheKey::new(ContentType::Sage, 1, "title", "fr");
        let other_lang = CacheKey::new(ContentType::Journey, 1, "title", "de");
        let other_field = CacheKey::new(ContentType::Journey, 1, "summary", "fr");

        for key in [other_id, other_type, other_lang, other_field] {
            assert!(store.get(&key).await.unwrap().is_none(), "{} should miss", key);
        }
    }

    #[tokio::test]
    async fn test_clear_for_content_removes_only_that_item() {
        let store = MemoryStore::new();
        store.put(&entry(1, "title", "fr", "a")).await.unwrap();
        store.put(&entry(1, "title", "de", "b")).await.unwrap();
        store.put(&entry(1, "summary", "fr", "c")).await.unwrap();
        store.put(&entry(2, "title", "fr", "d")).await.unwrap();

        let removed = store.clear_for_content(ContentType::Journey, 1).await.unwrap();

        assert_eq!(removed, 3);
        assert_eq!(store.len(), 1);
        let survivor = CacheKey::new(ContentType::Journey, 2, "title", "fr");
        assert!(store.get(&survivor).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_for_content_respects_content_type() {
        let store = MemoryStore::new();
        store.put(&entry(1, "title", "fr", "a")).await.unwrap();

        let removed = store.clear_for_content(ContentType::Ashram, 1).await.unwrap();

        assert_eq!(removed, 0);
        assert_eq!(store.len(), 1);
    }
}
