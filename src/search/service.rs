//! Autocomplete service
//!
//! The read path callers use: the query engine first, then the catalog's
//! substring search when the index has no hits or is unavailable. The
//! fallback is a degraded path and is not assumed to be fast.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::errors::{SearchError, SearchResult};
use super::prefix::{normalize_field, normalize_query};
use super::query::QueryEngine;
use super::types::{IndexedProduct, SearchOutcome, Suggestion, SuggestionSource};
use crate::observability::MetricsRegistry;

/// Error type surfaced by catalog implementations.
pub type FallbackError = Box<dyn std::error::Error + Send + Sync>;

/// The one read the index needs from the catalog.
#[async_trait]
pub trait CatalogFallback: Send + Sync {
    /// Products whose name contains `pattern`, case-insensitively.
    async fn find_by_name_substring(&self, pattern: &str) -> Result<Vec<IndexedProduct>, FallbackError>;
}

/// Index-first autocomplete with catalog fallback.
#[derive(Clone)]
pub struct AutocompleteService {
    engine: QueryEngine,
    fallback: Arc<dyn CatalogFallback>,
    metrics: Arc<MetricsRegistry>,
}

impl AutocompleteService {
    pub fn new(engine: QueryEngine, fallback: Arc<dyn CatalogFallback>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            engine,
            fallback,
            metrics,
        }
    }

    /// Suggestions for `query`.
    ///
    /// - empty query: empty result, no fallback
    /// - index hits: returned as-is
    /// - page past the last index hit: empty `Index` page, so paging never
    ///   switches source partway through
    /// - no hits for the query at all, or index unavailable: catalog
    ///   substring search
    /// - fallback failure: `Internal`
    pub async fn suggest(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
        cancel: &CancellationToken,
    ) -> SearchResult<SearchOutcome> {
        self.metrics.increment_searches();

        match self.engine.search(query, limit, offset, cancel).await {
            Ok(suggestions) if !suggestions.is_empty() => {
                self.metrics.increment_index_hits();
                return Ok(SearchOutcome {
                    suggestions,
                    source: SuggestionSource::Index,
                });
            }
            Ok(_) => {
                if normalize_query(query).is_empty() {
                    return Ok(SearchOutcome::empty());
                }
                if offset > 0 && self.index_has_hits(query, cancel).await? {
                    return Ok(SearchOutcome::empty());
                }
                tracing::debug!(query = %query, "no index hits, using catalog fallback");
            }
            Err(e) if e.is_unavailable() => {
                tracing::warn!(query = %query, error = %e, "index unavailable, using catalog fallback");
            }
            Err(e) => return Err(e),
        }

        self.fallback_search(query, limit, offset, cancel).await
    }

    /// Whether the index holds any product for `query`. An unavailable
    /// index counts as no hits.
    async fn index_has_hits(&self, query: &str, cancel: &CancellationToken) -> SearchResult<bool> {
        match self.engine.search(query, 1, 0, cancel).await {
            Ok(first) => Ok(!first.is_empty()),
            Err(e) if e.is_unavailable() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn fallback_search(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
        cancel: &CancellationToken,
    ) -> SearchResult<SearchOutcome> {
        self.metrics.increment_fallbacks();
        let pattern = query.trim();

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SearchError::cancelled("catalog fallback")),
            result = self.fallback.find_by_name_substring(pattern) => result,
        };
        let products = result.map_err(|e| {
            self.metrics.increment_fallback_failures();
            tracing::error!(query = %query, error = %e, "catalog fallback failed");
            SearchError::internal(format!("failed to search products: {}", e))
        })?;

        let mut seen = HashSet::new();
        let suggestions: Vec<Suggestion> = products
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .skip(offset)
            .take(limit)
            .map(|p| {
                Suggestion::new(
                    p.id,
                    normalize_field(&p.name),
                    normalize_field(&p.category),
                    normalize_field(&p.product_type),
                    p.image_url,
                )
            })
            .collect();

        Ok(SearchOutcome {
            suggestions,
            source: SuggestionSource::Catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::client::IndexClient;
    use crate::search::config::IndexConfig;
    use crate::search::indexer::Indexer;
    use crate::search::store::{IndexStore, MemoryIndexStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticCatalog {
        products: Vec<IndexedProduct>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StaticCatalog {
        fn new(products: Vec<IndexedProduct>) -> Self {
            Self {
                products,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                products: vec![],
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogFallback for StaticCatalog {
        async fn find_by_name_substring(&self, pattern: &str) -> Result<Vec<IndexedProduct>, FallbackError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("database is down".into());
            }
            let pattern = pattern.to_lowercase();
            Ok(self
                .products
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&pattern))
                .cloned()
                .collect())
        }
    }

    struct Fixture {
        service: AutocompleteService,
        indexer: Indexer,
        store: Arc<MemoryIndexStore>,
        catalog: Arc<StaticCatalog>,
        metrics: Arc<MetricsRegistry>,
    }

    async fn fixture(catalog: StaticCatalog) -> Fixture {
        let store = Arc::new(MemoryIndexStore::new());
        let client = IndexClient::connect(store.clone(), &IndexConfig::default())
            .await
            .unwrap();
        let metrics = Arc::new(MetricsRegistry::new());
        let catalog = Arc::new(catalog);
        let engine = QueryEngine::new(client.clone(), metrics.clone(), 3);
        Fixture {
            service: AutocompleteService::new(engine, catalog.clone(), metrics.clone()),
            indexer: Indexer::new(client, metrics.clone()),
            store,
            catalog,
            metrics,
        }
    }

    fn lamp() -> IndexedProduct {
        IndexedProduct::new("p9", "Desk Lamp", "Home", "Light", "")
    }

    #[tokio::test]
    async fn test_index_hit_skips_fallback() {
        let f = fixture(StaticCatalog::new(vec![lamp()])).await;
        let cancel = CancellationToken::new();
        f.indexer.index(&lamp(), &cancel).await.unwrap();

        let outcome = f.service.suggest("desk", 5, 0, &cancel).await.unwrap();
        assert_eq!(outcome.source, SuggestionSource::Index);
        assert_eq!(outcome.suggestions[0].id, "p9");
        assert_eq!(f.catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_miss_uses_fallback() {
        let f = fixture(StaticCatalog::new(vec![lamp()])).await;
        let outcome = f
            .service
            .suggest("sk la", 5, 0, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome.source, SuggestionSource::Catalog);
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.suggestions[0].title, "desk lamp - home light");
        assert_eq!(f.metrics.snapshot().fallbacks, 1);
    }

    #[tokio::test]
    async fn test_empty_query_no_fallback() {
        let f = fixture(StaticCatalog::new(vec![lamp()])).await;
        let outcome = f.service.suggest("  ", 5, 0, &CancellationToken::new()).await.unwrap();
        assert!(outcome.suggestions.is_empty());
        assert_eq!(f.catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unavailable_index_degrades() {
        let f = fixture(StaticCatalog::new(vec![lamp()])).await;
        f.store.close().await.unwrap();
        let outcome = f.service.suggest("desk", 5, 0, &CancellationToken::new()).await.unwrap();
        assert_eq!(outcome.source, SuggestionSource::Catalog);
        assert_eq!(outcome.suggestions[0].id, "p9");
    }

    #[tokio::test]
    async fn test_fallback_failure_is_internal() {
        let f = fixture(StaticCatalog::failing()).await;
        let err = f
            .service
            .suggest("nothing", 5, 0, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Internal(_)));
        assert_eq!(f.metrics.snapshot().fallback_failures, 1);
    }

    #[tokio::test]
    async fn test_invalid_limit_not_recovered() {
        let f = fixture(StaticCatalog::new(vec![lamp()])).await;
        let err = f.service.suggest("desk", 0, 0, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert_eq!(f.catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_page_past_index_hits_stays_on_index() {
        let f = fixture(StaticCatalog::new(vec![lamp()])).await;
        let cancel = CancellationToken::new();
        f.indexer.index(&lamp(), &cancel).await.unwrap();

        let outcome = f.service.suggest("desk", 5, 5, &cancel).await.unwrap();
        assert_eq!(outcome.source, SuggestionSource::Index);
        assert!(outcome.suggestions.is_empty());
        assert_eq!(f.catalog.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.metrics.snapshot().fallbacks, 0);
    }

    #[tokio::test]
    async fn test_fallback_paginates() {
        let products: Vec<IndexedProduct> = (0..5)
            .map(|i| IndexedProduct::new(format!("p{}", i), format!("Lamp {}", i), "home", "light", ""))
            .collect();
        let f = fixture(StaticCatalog::new(products)).await;
        let outcome = f.service.suggest("lamp", 2, 3, &CancellationToken::new()).await.unwrap();
        let ids: Vec<_> = outcome.suggestions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p4"]);
    }
}
