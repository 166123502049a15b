//! Indexer
//!
//! Turns products into sorted-set members and keeps the store in step with
//! catalog writes. Called after the catalog commit; callers treat errors
//! as non-fatal side-effect failures.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::client::IndexClient;
use super::entry::IndexEntry;
use super::errors::{SearchError, SearchResult};
use super::prefix::{normalize_field, product_prefixes};
use super::types::IndexedProduct;
use crate::observability::MetricsRegistry;

/// Writes and removes a product's autocomplete entries.
#[derive(Clone)]
pub struct Indexer {
    client: IndexClient,
    metrics: Arc<MetricsRegistry>,
}

impl Indexer {
    pub fn new(client: IndexClient, metrics: Arc<MetricsRegistry>) -> Self {
        Self { client, metrics }
    }

    /// Every encoded member for `product`, one per distinct prefix.
    ///
    /// Fails with `InvalidArgument` if the id or name is empty.
    pub fn build_members(product: &IndexedProduct) -> SearchResult<Vec<String>> {
        let id = product.id.trim();
        if id.is_empty() {
            return Err(SearchError::invalid_argument("product id is required"));
        }
        let normalized = IndexedProduct::new(
            id,
            normalize_field(&product.name),
            normalize_field(&product.category),
            normalize_field(&product.product_type),
            product.image_url.trim(),
        );
        if normalized.name.is_empty() {
            return Err(SearchError::invalid_argument("product name is required"));
        }

        Ok(product_prefixes(
            &normalized.name,
            &normalized.category,
            &normalized.product_type,
        )
        .iter()
        .map(|prefix| IndexEntry::for_product(prefix, &normalized).encode())
        .collect())
    }

    /// Add `product` to the index in one batch write.
    ///
    /// Returns the number of members written.
    pub async fn index(&self, product: &IndexedProduct, cancel: &CancellationToken) -> SearchResult<usize> {
        let members = Self::build_members(product)?;
        let count = members.len();

        self.client.insert_many(members, cancel).await.map_err(|e| {
            tracing::error!(product_id = %product.id, error = %e, "index write failed");
            e
        })?;

        self.metrics.record_indexed(count as u64);
        tracing::debug!(product_id = %product.id, entries = count, "product indexed");
        Ok(count)
    }

    /// Replace all of `product`'s entries in one atomic store command.
    ///
    /// Readers see either the old entries or the new ones.
    pub async fn reindex(&self, product: &IndexedProduct, cancel: &CancellationToken) -> SearchResult<usize> {
        let members = Self::build_members(product)?;
        let count = members.len();
        let id = product.id.trim().to_string();
        let matches_id = move |candidate: &str| candidate == id;

        let removed = self
            .client
            .replace_matching(&matches_id, members, cancel)
            .await
            .map_err(|e| {
                tracing::error!(product_id = %product.id, error = %e, "reindex failed");
                e
            })?;

        self.metrics.add_entries_removed(removed);
        self.metrics.record_indexed(count as u64);
        tracing::debug!(product_id = %product.id, removed, entries = count, "product reindexed");
        Ok(count)
    }

    /// Remove every entry for `product_id`. Unknown ids are not an error.
    ///
    /// Returns the number of members removed.
    pub async fn remove(&self, product_id: &str, cancel: &CancellationToken) -> SearchResult<u64> {
        let id = product_id.trim().to_string();
        if id.is_empty() {
            return Err(SearchError::invalid_argument("product id is required"));
        }
        let target = id.clone();
        let matches_id = move |candidate: &str| candidate == target;

        let removed = self.client.delete_matching(&matches_id, cancel).await.map_err(|e| {
            tracing::error!(product_id = %id, error = %e, "index removal failed");
            e
        })?;

        if removed == 0 {
            tracing::debug!(product_id = %id, "no index entries to remove");
        } else {
            tracing::debug!(product_id = %id, removed, "product removed from index");
            self.metrics.record_removed(removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::IndexConfig;
    use crate::search::store::{IndexStore, MemoryIndexStore};

    fn bike() -> IndexedProduct {
        IndexedProduct::new("p1", "Red Bike", "Sports", "Cycle", "https://img.example/p1.png")
    }

    async fn indexer() -> (Indexer, Arc<MemoryIndexStore>, Arc<MetricsRegistry>) {
        let store = Arc::new(MemoryIndexStore::new());
        let client = IndexClient::connect(store.clone(), &IndexConfig::default())
            .await
            .unwrap();
        let metrics = Arc::new(MetricsRegistry::new());
        (Indexer::new(client, metrics.clone()), store, metrics)
    }

    #[test]
    fn test_build_members_normalizes_fields() {
        let members = Indexer::build_members(&bike()).unwrap();
        let first = IndexEntry::decode(&members[0]).unwrap();
        assert_eq!(first.prefix, "r");
        assert_eq!(first.product_id, "p1");
        assert_eq!(first.name, "red bike");
        assert_eq!(first.category, "sports");
        assert_eq!(first.product_type, "cycle");
    }

    #[test]
    fn test_build_members_one_per_prefix() {
        let members = Indexer::build_members(&bike()).unwrap();
        let mut prefixes: Vec<String> = members
            .iter()
            .map(|m| IndexEntry::decode(m).unwrap().prefix)
            .collect();
        let total = prefixes.len();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), total);
    }

    #[test]
    fn test_missing_id_or_name_rejected() {
        let mut p = bike();
        p.id = "  ".to_string();
        assert!(matches!(
            Indexer::build_members(&p),
            Err(SearchError::InvalidArgument(_))
        ));

        let mut p = bike();
        p.name = String::new();
        assert!(matches!(
            Indexer::build_members(&p),
            Err(SearchError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_index_then_remove() {
        let (indexer, store, metrics) = indexer().await;
        let cancel = CancellationToken::new();

        let written = indexer.index(&bike(), &cancel).await.unwrap();
        assert_eq!(store.len(), written);

        let removed = indexer.remove("p1", &cancel).await.unwrap();
        assert_eq!(removed as usize, written);
        assert!(store.is_empty());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.products_indexed, 1);
        assert_eq!(snapshot.entries_removed, written as u64);
    }

    #[tokio::test]
    async fn test_remove_unknown_is_ok() {
        let (indexer, _, metrics) = indexer().await;
        let removed = indexer.remove("nope", &CancellationToken::new()).await.unwrap();
        assert_eq!(removed, 0);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.products_removed, 0);
        assert_eq!(snapshot.entries_removed, 0);
    }

    #[tokio::test]
    async fn test_index_twice_is_idempotent() {
        let (indexer, store, _) = indexer().await;
        let cancel = CancellationToken::new();
        let written = indexer.index(&bike(), &cancel).await.unwrap();
        indexer.index(&bike(), &cancel).await.unwrap();
        assert_eq!(store.len(), written);

        indexer.remove("p1", &cancel).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_reindex_drops_stale_fields() {
        let (indexer, store, _) = indexer().await;
        let cancel = CancellationToken::new();
        indexer.index(&bike(), &cancel).await.unwrap();

        let renamed = IndexedProduct::new("p1", "Blue Bike", "Sports", "Cycle", "");
        let written = indexer.reindex(&renamed, &cancel).await.unwrap();
        assert_eq!(store.len(), written);

        let all = (std::ops::Bound::Unbounded, std::ops::Bound::Unbounded);
        let members = store.range_by_lex(all, 0, usize::MAX).await.unwrap();
        assert_eq!(members.len(), written);
        for member in members {
            assert_eq!(IndexEntry::decode(&member).unwrap().name, "blue bike");
        }
    }

    #[tokio::test]
    async fn test_remove_leaves_other_products() {
        let (indexer, store, _) = indexer().await;
        let cancel = CancellationToken::new();
        indexer.index(&bike(), &cancel).await.unwrap();
        let other = IndexedProduct::new("p2", "Red Lamp", "Home", "Light", "");
        let other_count = indexer.index(&other, &cancel).await.unwrap();

        indexer.remove("p1", &cancel).await.unwrap();
        assert_eq!(store.len(), other_count);
    }
}
