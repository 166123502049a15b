//! Concurrency Tests
//!
//! Racing writers and readers against one index:
//! - index vs. remove for the same product ends fully present or fully absent
//! - a reader never observes a product with a mix of old and new fields
//! - a cancelled caller gets `Cancelled`, not a generic failure

use std::collections::HashSet;
use std::ops::Bound;
use std::sync::Arc;

use storefront::observability::MetricsRegistry;
use storefront::search::{
    IndexClient, IndexConfig, IndexEntry, IndexStore, IndexedProduct, Indexer, MemoryIndexStore,
    QueryEngine, SearchError,
};
use tokio_util::sync::CancellationToken;

// =============================================================================
// Helper Functions
// =============================================================================

async fn setup() -> (Arc<MemoryIndexStore>, Indexer, QueryEngine) {
    let store = Arc::new(MemoryIndexStore::new());
    let client = IndexClient::connect(store.clone(), &IndexConfig::default())
        .await
        .unwrap();
    let metrics = Arc::new(MetricsRegistry::new());
    let indexer = Indexer::new(client.clone(), metrics.clone());
    let engine = QueryEngine::new(client, metrics, 3);
    (store, indexer, engine)
}

fn variant(name: &str) -> IndexedProduct {
    IndexedProduct::new("p1", name, "Sports", "Cycle", "https://img.example/p1.png")
}

/// Decoded names of every stored entry for `id`, from one atomic scan.
async fn names_for(store: &MemoryIndexStore, id: &str) -> Vec<String> {
    store
        .range_by_lex((Bound::Unbounded, Bound::Unbounded), 0, usize::MAX)
        .await
        .unwrap()
        .iter()
        .filter_map(|m| IndexEntry::decode(m).ok())
        .filter(|e| e.product_id == id)
        .map(|e| e.name)
        .collect()
}

// =============================================================================
// Atomicity Tests
// =============================================================================

/// Index and remove racing for one product never leave a partial entry set.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_index_remove_race_is_all_or_nothing() {
    let (store, indexer, _) = setup().await;
    let product = variant("Red Bike");
    let full = Indexer::build_members(&product).unwrap().len();

    for _ in 0..20 {
        let mut tasks = Vec::new();
        for i in 0..8 {
            let indexer = indexer.clone();
            let product = product.clone();
            tasks.push(tokio::spawn(async move {
                let cancel = CancellationToken::new();
                if i % 2 == 0 {
                    indexer.index(&product, &cancel).await.map(|_| ())
                } else {
                    indexer.remove("p1", &cancel).await.map(|_| ())
                }
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let present = names_for(&store, "p1").await.len();
        assert!(present == 0 || present == full, "partial index: {} of {}", present, full);
    }
}

/// Readers racing a reindex see only old fields or only new fields.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reindex_never_mixes_fields() {
    let (store, indexer, _) = setup().await;
    let cancel = CancellationToken::new();
    indexer.index(&variant("Red Bike"), &cancel).await.unwrap();

    let writer = {
        let indexer = indexer.clone();
        tokio::spawn(async move {
            let cancel = CancellationToken::new();
            for i in 0..200 {
                let name = if i % 2 == 0 { "Blue Bike" } else { "Red Bike" };
                indexer.reindex(&variant(name), &cancel).await.unwrap();
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let names: HashSet<String> = names_for(&store, "p1").await.into_iter().collect();
                assert_eq!(names.len(), 1, "mixed fields observed: {:?}", names);
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}

/// Concurrent searches during indexing only ever return complete suggestions.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_search_during_indexing() {
    let (_, indexer, engine) = setup().await;

    let writer = {
        let indexer = indexer.clone();
        tokio::spawn(async move {
            let cancel = CancellationToken::new();
            for i in 0..50 {
                let p = IndexedProduct::new(
                    format!("p{}", i),
                    format!("Bike {}", i),
                    "Sports",
                    "Cycle",
                    "https://img.example/b.png",
                );
                indexer.index(&p, &cancel).await.unwrap();
            }
        })
    };

    let reader = tokio::spawn(async move {
        let cancel = CancellationToken::new();
        let mut last = 0;
        for _ in 0..100 {
            let hits = engine.search("bike", 100, 0, &cancel).await.unwrap();
            let ids: HashSet<_> = hits.iter().map(|s| s.id.clone()).collect();
            assert_eq!(ids.len(), hits.len(), "duplicate products in one page");
            assert!(hits.iter().all(|s| s.category == "sports" && s.product_type == "cycle"));
            assert!(hits.len() >= last, "indexed products disappeared");
            last = hits.len();
            tokio::task::yield_now().await;
        }
    });

    writer.await.unwrap();
    reader.await.unwrap();
}

// =============================================================================
// Cancellation
// =============================================================================

/// A token cancelled before the call yields `Cancelled` for reads and writes.
#[tokio::test]
async fn test_cancelled_token() {
    let (store, indexer, engine) = setup().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = indexer.index(&variant("Red Bike"), &cancel).await.unwrap_err();
    assert!(matches!(err, SearchError::Cancelled(_)));
    assert!(store.is_empty());

    let err = engine.search("red", 10, 0, &cancel).await.unwrap_err();
    assert!(matches!(err, SearchError::Cancelled(_)));
}
