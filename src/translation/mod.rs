//! Cache-aside translation of site content.
//!
//! A `TranslationService` answers from a `TranslationStore` when it can and
//! otherwise asks a `TranslationProvider`, writing fresh results back to the
//! store in the background.

mod model;
mod provider;
mod service;
mod store;

pub use model::{CacheEntry, CacheKey, ContentType};
pub use provider::{GoogleTranslateClient, ProviderError, TranslationProvider};
pub use service::TranslationService;
pub use store::{MemoryStore, TranslationStore};
