//! Metrics registry for storefront
//!
//! - Counters only, monotonic, reset on process start
//! - Relaxed atomics: counts are exact, cross-counter ordering is not

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the autocomplete index and its fallback.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful `index`/`reindex` calls
    products_indexed: AtomicU64,
    /// Members written by those calls
    entries_written: AtomicU64,
    /// `remove` calls that deleted at least one entry
    products_removed: AtomicU64,
    /// Members deleted by `remove`/`reindex`
    entries_removed: AtomicU64,
    /// Index side effects that failed during a catalog write
    index_failures: AtomicU64,
    /// Autocomplete requests served
    searches: AtomicU64,
    /// Requests answered from the index
    index_hits: AtomicU64,
    /// Requests answered by the catalog fallback
    fallbacks: AtomicU64,
    /// Requests where the fallback failed too
    fallback_failures: AtomicU64,
    /// Members skipped because they could not be decoded
    corrupt_entries: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Indexer

    pub fn record_indexed(&self, entries: u64) {
        self.products_indexed.fetch_add(1, Ordering::Relaxed);
        self.entries_written.fetch_add(entries, Ordering::Relaxed);
    }

    pub fn record_removed(&self, entries: u64) {
        self.products_removed.fetch_add(1, Ordering::Relaxed);
        self.entries_removed.fetch_add(entries, Ordering::Relaxed);
    }

    /// Entries dropped by a reindex replace
    pub fn add_entries_removed(&self, entries: u64) {
        self.entries_removed.fetch_add(entries, Ordering::Relaxed);
    }

    pub fn increment_index_failures(&self) {
        self.index_failures.fetch_add(1, Ordering::Relaxed);
    }

    // Query path

    pub fn increment_searches(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_index_hits(&self) {
        self.index_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_fallbacks(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_fallback_failures(&self) {
        self.fallback_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_corrupt_entries(&self) {
        self.corrupt_entries.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            products_indexed: self.products_indexed.load(Ordering::Relaxed),
            entries_written: self.entries_written.load(Ordering::Relaxed),
            products_removed: self.products_removed.load(Ordering::Relaxed),
            entries_removed: self.entries_removed.load(Ordering::Relaxed),
            index_failures: self.index_failures.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            index_hits: self.index_hits.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            fallback_failures: self.fallback_failures.load(Ordering::Relaxed),
            corrupt_entries: self.corrupt_entries.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub products_indexed: u64,
    pub entries_written: u64,
    pub products_removed: u64,
    pub entries_removed: u64,
    pub index_failures: u64,
    pub searches: u64,
    pub index_hits: u64,
    pub fallbacks: u64,
    pub fallback_failures: u64,
    pub corrupt_entries: u64,
}
