use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

/// Kinds of site content whose fields can be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Journey,
    Sage,
    Ashram,
    Blog,
    Quote,
    Testimonial,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Journey,
        ContentType::Sage,
        ContentType::Ashram,
        ContentType::Blog,
        ContentType::Quote,
        ContentType::Testimonial,
    ];

    /// Tag stored in the `content_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Journey => "journey",
            ContentType::Sage => "sage",
            ContentType::Ashram => "ashram",
            ContentType::Blog => "blog",
            ContentType::Quote => "quote",
            ContentType::Testimonial => "testimonial",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match ContentType::ALL.iter().find(|ct| ct.as_str() == s) {
            Some(ct) => Ok(*ct),
            None => bail!("Unknown content type: '{}'", s),
        }
    }
}

/// Composite identity of one cached translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub content_type: ContentType,
    pub content_id: i32,
    pub field_name: String,
    pub language: String,
}

impl CacheKey {
    pub fn new(
        content_type: ContentType,
        content_id: i32,
        field_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            content_type,
            content_id,
            field_name: field_name.into(),
            language: language.into(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}@{}",
            self.content_type, self.content_id, self.field_name, self.language
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub original_text: String,
    pub translated_text: String,
    pub updated_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: CacheKey, original_text: &str, translated_text: &str) -> Self {
        Self {
            key,
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            updated_at: Utc::now(),
        }
    }
}
