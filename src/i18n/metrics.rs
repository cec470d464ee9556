//! Translation metrics and observability module.
//!
//! Counters are owned by a `TranslationService`, one set per instance.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Lookups answered from the cache
    cache_hits: AtomicUsize,

    /// Lookups with no usable cache entry (includes stale entries)
    cache_misses: AtomicUsize,

    /// Entries found but discarded because their source text changed
    stale_entries: AtomicUsize,

    /// Cache lookups that errored and were treated as misses
    cache_read_failures: AtomicUsize,

    /// Background cache writes that failed
    cache_write_failures: AtomicUsize,

    /// Translations handed to the provider
    api_calls: AtomicUsize,

    /// Provider requests that failed or were skipped for lack of a credential
    api_failures: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_entry(&self) {
        self.stale_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_read_failure(&self) {
        self.cache_read_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_write_failure(&self) {
        self.cache_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn stale_entries(&self) -> usize {
        self.stale_entries.load(Ordering::Relaxed)
    }

    pub fn cache_read_failures(&self) -> usize {
        self.cache_read_failures.load(Ordering::Relaxed)
    }

    pub fn cache_write_failures(&self) -> usize {
        self.cache_write_failures.load(Ordering::Relaxed)
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn api_failures(&self) -> usize {
        self.api_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.api_calls();
        let failures = self.api_failures();
        let api_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            stale_entries: self.stale_entries(),
            cache_read_failures: self.cache_read_failures(),
            cache_write_failures: self.cache_write_failures(),
            api_calls: calls,
            api_failures: failures,
            api_success_rate,
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Percentage (0-100)
    pub cache_hit_rate: f64,
    pub stale_entries: usize,
    pub cache_read_failures: usize,
    pub cache_write_failures: usize,
    pub api_calls: usize,
    pub api_failures: usize,
    /// Percentage (0-100)
    pub api_success_rate: f64,
}
