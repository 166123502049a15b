//! # Catalog Service
//!
//! Product writes and reads. Every successful write is followed by the
//! matching index update; index failures are logged and counted but never
//! fail the write, since the catalog is the system of record.
//!
//! A delete can commit between another request's repository write and its
//! index write. Create and update therefore re-read the product after
//! indexing and drop its entries if it is gone; whichever request indexes
//! last also sees the delete, so no entries outlive the product.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::errors::{CatalogError, CatalogResult};
use super::product::{Product, ProductInput};
use super::repository::CatalogRepository;
use crate::auth::Caller;
use crate::observability::MetricsRegistry;
use crate::search::Indexer;

/// Catalog writes with autocomplete index side effects
pub struct CatalogService<R: CatalogRepository> {
    repo: Arc<R>,
    indexer: Indexer,
    metrics: Arc<MetricsRegistry>,
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            indexer: self.indexer.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: Arc<R>, indexer: Indexer, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repo,
            indexer,
            metrics,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Create a product owned by the caller, then index it
    pub async fn create(
        &self,
        caller: &Caller,
        input: ProductInput,
        cancel: &CancellationToken,
    ) -> CatalogResult<Product> {
        input.validate_create()?;
        let product = Product::new(input, caller.user_id);
        self.repo.create(&product)?;
        tracing::info!(product_id = %product.id, owner = %caller.user_id, "product created");

        if let Err(e) = self.indexer.index(&product.to_indexed(), cancel).await {
            self.index_side_effect_failed("index", product.id, &e);
        }
        self.drop_if_deleted(product.id, cancel).await;
        Ok(product)
    }

    /// Update a product the caller owns, then replace its index entries
    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        input: ProductInput,
        cancel: &CancellationToken,
    ) -> CatalogResult<Product> {
        input.validate_update()?;
        let mut product = self.owned(caller, id, "update")?;
        product.apply(input);
        self.repo.update(&product)?;
        tracing::info!(product_id = %product.id, "product updated");

        if let Err(e) = self.indexer.reindex(&product.to_indexed(), cancel).await {
            self.index_side_effect_failed("reindex", product.id, &e);
        }
        self.drop_if_deleted(product.id, cancel).await;
        Ok(product)
    }

    /// Delete a product the caller owns, then drop its index entries
    pub async fn delete(&self, caller: &Caller, id: Uuid, cancel: &CancellationToken) -> CatalogResult<()> {
        self.owned(caller, id, "delete")?;
        self.repo.delete(id)?;
        tracing::info!(product_id = %id, "product deleted");

        if let Err(e) = self.indexer.remove(&id.to_string(), cancel).await {
            self.index_side_effect_failed("remove", id, &e);
        }
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> CatalogResult<Product> {
        self.repo.find_by_id(id)?.ok_or_else(|| CatalogError::not_found(id))
    }

    pub fn list(&self, limit: usize, offset: usize) -> CatalogResult<Vec<Product>> {
        self.repo.list(limit, offset)
    }

    /// Index existing products; individual failures are logged and skipped.
    ///
    /// Returns how many products were indexed.
    pub async fn bulk_index(&self, products: &[Product], cancel: &CancellationToken) -> usize {
        let mut indexed = 0;
        for product in products {
            match self.indexer.index(&product.to_indexed(), cancel).await {
                Ok(_) => indexed += 1,
                Err(e) => self.index_side_effect_failed("bulk index", product.id, &e),
            }
        }
        tracing::info!(indexed, total = products.len(), "bulk index finished");
        indexed
    }

    /// Store seed products that are not already present, then index them all.
    pub async fn seed(&self, products: Vec<Product>, cancel: &CancellationToken) -> CatalogResult<usize> {
        let mut stored = Vec::with_capacity(products.len());
        for product in products {
            match self.repo.create(&product) {
                Ok(()) => stored.push(product),
                Err(CatalogError::AlreadyExists(id)) => {
                    tracing::debug!(product_id = %id, "seed product already present");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.bulk_index(&stored, cancel).await)
    }

    fn owned(&self, caller: &Caller, id: Uuid, action: &str) -> CatalogResult<Product> {
        let product = self.get(id)?;
        if product.created_by != caller.user_id {
            tracing::warn!(product_id = %id, caller = %caller.user_id, action, "ownership check failed");
            return Err(CatalogError::Forbidden(action.to_string()));
        }
        Ok(product)
    }

    /// Remove `id` from the index if a concurrent delete already removed
    /// it from the catalog.
    async fn drop_if_deleted(&self, id: Uuid, cancel: &CancellationToken) {
        match self.repo.find_by_id(id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!(product_id = %id, "product deleted while indexing");
                if let Err(e) = self.indexer.remove(&id.to_string(), cancel).await {
                    self.index_side_effect_failed("remove", id, &e);
                }
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "cannot re-check product after indexing");
            }
        }
    }

    fn index_side_effect_failed(&self, op: &str, id: Uuid, error: &crate::search::SearchError) {
        self.metrics.increment_index_failures();
        tracing::warn!(product_id = %id, op, error = %error, "index update failed; catalog write kept");
    }
}
