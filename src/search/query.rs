//! Query engine
//!
//! Prefix lookup as a lexicographic range scan over raw members, then
//! first-seen de-duplication by product id and offset/limit paging over
//! the distinct products. Results keep the store's native order; there is
//! no scoring.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::client::IndexClient;
use super::entry::{prefix_range, IndexEntry};
use super::errors::{SearchError, SearchResult};
use super::prefix::normalize_query;
use super::types::Suggestion;
use crate::observability::MetricsRegistry;

/// Answers autocomplete queries from the index store.
#[derive(Clone)]
pub struct QueryEngine {
    client: IndexClient,
    metrics: Arc<MetricsRegistry>,
    over_fetch_factor: usize,
}

impl QueryEngine {
    pub fn new(client: IndexClient, metrics: Arc<MetricsRegistry>, over_fetch_factor: usize) -> Self {
        Self {
            client,
            metrics,
            over_fetch_factor: over_fetch_factor.max(1),
        }
    }

    /// Up to `limit` distinct products whose indexed prefixes start with
    /// `query`, skipping the first `offset` distinct products.
    ///
    /// An empty or whitespace-only query yields an empty list.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
        cancel: &CancellationToken,
    ) -> SearchResult<Vec<Suggestion>> {
        if limit == 0 {
            return Err(SearchError::invalid_argument("limit must be greater than zero"));
        }

        let prefix = normalize_query(query);
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let wanted = offset.saturating_add(limit);
        let mut window = wanted.saturating_mul(self.over_fetch_factor);
        let mut raw_offset = 0usize;
        let mut seen: HashSet<String> = HashSet::new();
        let mut distinct: Vec<IndexEntry> = Vec::with_capacity(wanted.min(1024));

        loop {
            let batch = self
                .client
                .range_by_lex(prefix_range(&prefix), raw_offset, window, cancel)
                .await?;
            let fetched = batch.len();
            raw_offset = raw_offset.saturating_add(fetched);

            for member in batch {
                match IndexEntry::decode(&member) {
                    Ok(entry) => {
                        if seen.insert(entry.product_id.clone()) {
                            distinct.push(entry);
                        }
                    }
                    Err(e) => {
                        self.metrics.increment_corrupt_entries();
                        tracing::warn!(member = %member, error = %e, "skipping corrupt index entry");
                    }
                }
                if distinct.len() >= wanted {
                    break;
                }
            }

            // A short batch means the range is exhausted.
            if distinct.len() >= wanted || fetched < window {
                break;
            }
            window = window.saturating_mul(2);
        }

        tracing::trace!(
            query = %prefix,
            scanned = raw_offset,
            distinct = distinct.len(),
            "range scan complete"
        );

        Ok(distinct
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(IndexEntry::into_suggestion)
            .collect())
    }
}
