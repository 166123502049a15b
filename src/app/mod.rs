//! # Application wiring
//!
//! Builds the process-wide object graph once at startup: the index client
//! is connected explicitly, handed to the indexer and query engine, and
//! closed again by [`Storefront::shutdown`].

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::auth::JwtManager;
use crate::catalog::{load_seed, CatalogResult, CatalogService, InMemoryCatalog};
use crate::config::AppConfig;
use crate::observability::MetricsRegistry;
use crate::search::{
    AutocompleteService, IndexClient, IndexConfig, IndexStore, Indexer, MemoryIndexStore,
    QueryEngine, SearchResult,
};

/// Everything a request handler or CLI command needs
pub struct Storefront {
    pub client: IndexClient,
    pub autocomplete: AutocompleteService,
    pub catalog: CatalogService<InMemoryCatalog>,
    pub jwt: JwtManager,
    pub metrics: Arc<MetricsRegistry>,
    pub index_config: IndexConfig,
    shutdown: CancellationToken,
}

impl Storefront {
    /// Boot against a fresh in-memory index store and catalog
    pub async fn new_in_memory(config: &AppConfig) -> SearchResult<Self> {
        Self::with_store(
            Arc::new(MemoryIndexStore::new()),
            Arc::new(InMemoryCatalog::new()),
            config,
        )
        .await
    }

    /// Boot against the given store and catalog
    pub async fn with_store(
        store: Arc<dyn IndexStore>,
        catalog: Arc<InMemoryCatalog>,
        config: &AppConfig,
    ) -> SearchResult<Self> {
        let metrics = Arc::new(MetricsRegistry::new());
        let client = IndexClient::connect(store, &config.index).await?;

        let indexer = Indexer::new(client.clone(), metrics.clone());
        let engine = QueryEngine::new(client.clone(), metrics.clone(), config.index.over_fetch_factor);
        let autocomplete = AutocompleteService::new(engine, catalog.clone(), metrics.clone());
        let catalog = CatalogService::new(catalog, indexer, metrics.clone());

        Ok(Self {
            client,
            autocomplete,
            catalog,
            jwt: JwtManager::new(config.auth.jwt_config()),
            metrics,
            index_config: config.index.clone(),
            shutdown: CancellationToken::new(),
        })
    }

    /// Load a seed file into the catalog and index it.
    ///
    /// Returns how many products were indexed.
    pub async fn seed_from(&self, path: &Path) -> CatalogResult<usize> {
        let products = load_seed(path)?;
        let total = products.len();
        let indexed = self.catalog.seed(products, &self.shutdown).await?;
        tracing::info!(path = %path.display(), total, indexed, "seed catalog loaded");
        Ok(indexed)
    }

    /// Token for one unit of work; cancelled when the process shuts down.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Token the HTTP server waits on for graceful shutdown
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Cancel in-flight work and close the index client.
    pub async fn shutdown(&self) -> SearchResult<()> {
        self.shutdown.cancel();
        self.client.shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_seed_then_suggest() {
        let app = Storefront::new_in_memory(&AppConfig::default()).await.unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"Red Bike","price":120.0,"category":"Sports","type":"Cycle","image_url":"https://img.example/a.png"}}]"#
        )
        .unwrap();

        assert_eq!(app.seed_from(file.path()).await.unwrap(), 1);

        let outcome = app
            .autocomplete
            .suggest("bik", 10, 0, &app.request_token())
            .await
            .unwrap();
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.suggestions[0].title, "red bike - sports cycle");
    }

    #[tokio::test]
    async fn test_shutdown_cancels_requests() {
        let app = Storefront::new_in_memory(&AppConfig::default()).await.unwrap();
        let token = app.request_token();
        app.shutdown().await.unwrap();
        assert!(token.is_cancelled());
    }
}
