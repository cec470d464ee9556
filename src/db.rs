use crate::translation::{CacheEntry, CacheKey, ContentType, TranslationStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::info;

#[derive(Debug, FromRow)]
struct CacheRow {
    original_text: String,
    translated_text: String,
    updated_at: DateTime<Utc>,
}

/// PostgreSQL-backed translation cache.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the database and create the cache table if needed.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS translation_cache (
                id SERIAL PRIMARY KEY,
                content_type TEXT NOT NULL,
                content_id INTEGER NOT NULL,
                field_name TEXT NOT NULL,
                language TEXT NOT NULL,
                original_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (content_type, content_id, field_name, language)
            )",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create translation_cache table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_translation_cache_content
             ON translation_cache (content_type, content_id)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create translation_cache index")?;

        info!("✓ Translation cache schema ready");
        Ok(())
    }

    /// Number of cached translations, across all content.
    pub async fn count_entries(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM translation_cache")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count cached translations")?;
        Ok(count)
    }
}

#[async_trait]
impl TranslationStore for Database {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let row: Option<CacheRow> = sqlx::query_as(
            "SELECT original_text, translated_text, updated_at
             FROM translation_cache
             WHERE content_type = $1 AND content_id = $2 AND field_name = $3 AND language = $4",
        )
        .bind(key.content_type.as_str())
        .bind(key.content_id)
        .bind(&key.field_name)
        .bind(&key.language)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read cached translation")?;

        Ok(row.map(|row| CacheEntry {
            key: key.clone(),
            original_text: row.original_text,
            translated_text: row.translated_text,
            updated_at: row.updated_at,
        }))
    }

    async fn put(&self, entry: &CacheEntry) -> Result<()> {
        sqlx::query(
            "INSERT INTO translation_cache
                (content_type, content_id, field_name, language, original_text, translated_text, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (content_type, content_id, field_name, language)
             DO UPDATE SET
                original_text = EXCLUDED.original_text,
                translated_text = EXCLUDED.translated_text,
                updated_at = EXCLUDED.updated_at",
        )
        .bind(entry.key.content_type.as_str())
        .bind(entry.key.content_id)
        .bind(&entry.key.field_name)
        .bind(&entry.key.language)
        .bind(&entry.original_text)
        .bind(&entry.translated_text)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to save cached translation")?;

        Ok(())
    }

    async fn clear_for_content(&self, content_type: ContentType, content_id: i32) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM translation_cache WHERE content_type = $1 AND content_id = $2",
        )
        .bind(content_type.as_str())
        .bind(content_id)
        .execute(&self.pool)
        .await
        .context("Failed to clear cached translations")?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    //! These tests need a disposable PostgreSQL database:
    //! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`

    use super::*;

    async fn create_test_db() -> Database {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
        let db = Database::new(&url, 2).await.expect("Failed to connect");
        sqlx::query("TRUNCATE translation_cache")
            .execute(&db.pool)
            .await
            .expect("Failed to truncate");
        db
    }

    fn entry(content_id: i32, field: &str, original: &str, translated: &str) -> CacheEntry {
        CacheEntry::new(
            CacheKey::new(ContentType::Ashram, content_id, field, "hi"),
            original,
            translated,
        )
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
    async fn test_init_schema_is_idempotent() {
        let db = create_test_db().await;
        db.init_schema().await.expect("Second init should succeed");
        assert_eq!(db.count_entries().await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
    async fn test_put_and_get() {
        let db = create_test_db().await;
        let e = entry(1, "name", "Parmarth Niketan", "परमार्थ निकेतन");

        db.put(&e).await.expect("Should save");
        let found = db.get(&e.key).await.unwrap().expect("Should be cached");

        assert_eq!(found.original_text, "Parmarth Niketan");
        assert_eq!(found.translated_text, "परमार्थ निकेतन");
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
    async fn test_put_upserts() {
        let db = create_test_db().await;
        db.put(&entry(1, "name", "old", "पुराना")).await.unwrap();
        db.put(&entry(1, "name", "new", "नया")).await.unwrap();

        assert_eq!(db.count_entries().await.unwrap(), 1);
        let key = CacheKey::new(ContentType::Ashram, 1, "name", "hi");
        let found = db.get(&key).await.unwrap().unwrap();
        assert_eq!(found.original_text, "new");
        assert_eq!(found.translated_text, "नया");
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
    async fn test_get_missing() {
        let db = create_test_db().await;
        let key = CacheKey::new(ContentType::Ashram, 99, "name", "hi");
        assert!(db.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
    async fn test_clear_for_content() {
        let db = create_test_db().await;
        db.put(&entry(1, "name", "a", "अ")).await.unwrap();
        db.put(&entry(1, "description", "b", "ब")).await.unwrap();
        db.put(&entry(2, "name", "c", "क")).await.unwrap();

        let removed = db.clear_for_content(ContentType::Ashram, 1).await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(db.count_entries().await.unwrap(), 1);
    }
}
