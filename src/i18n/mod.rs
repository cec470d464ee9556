//! Internationalization (i18n) module.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported display languages
//!   and the provider code each one maps to
//! - `language`: Validated `Language` type built from the registry
//! - `metrics`: Counters for cache and provider traffic
//!
//! # Example
//!
//! ```rust,ignore
//! use yatra_translate::i18n::{Language, LanguageRegistry};
//!
//! let hindi = Language::from_code("hi")?;
//! let provider_code = LanguageRegistry::get().provider_code("zh"); // "zh-CN"
//! ```

mod language;
mod metrics;
mod registry;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
