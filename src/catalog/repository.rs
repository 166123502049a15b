//! # Catalog Repository
//!
//! System of record for products. The in-memory implementation doubles as
//! the autocomplete index's catalog fallback.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::{CatalogError, CatalogResult};
use super::product::Product;
use crate::search::{CatalogFallback, FallbackError, IndexedProduct};

/// Product repository trait
///
/// Abstracts storage operations for products.
pub trait CatalogRepository: Send + Sync {
    /// Find a product by its ID
    fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Products whose name contains `pattern`, case-insensitively
    fn find_by_name_substring(&self, pattern: &str) -> CatalogResult<Vec<Product>>;

    /// Page through products in insertion order
    fn list(&self, limit: usize, offset: usize) -> CatalogResult<Vec<Product>>;

    /// Create a new product
    fn create(&self, product: &Product) -> CatalogResult<()>;

    /// Update an existing product
    fn update(&self, product: &Product) -> CatalogResult<()>;

    /// Delete a product
    fn delete(&self, id: Uuid) -> CatalogResult<()>;
}

/// In-memory product repository
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CatalogError {
    CatalogError::StorageError("Lock poisoned".to_string())
}

impl CatalogRepository for InMemoryCatalog {
    fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    fn find_by_name_substring(&self, pattern: &str) -> CatalogResult<Vec<Product>> {
        let needle = pattern.to_lowercase();
        let products = self.products.read().map_err(poisoned)?;
        Ok(products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn list(&self, limit: usize, offset: usize) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.iter().skip(offset).take(limit).cloned().collect())
    }

    fn create(&self, product: &Product) -> CatalogResult<()> {
        let mut products = self.products.write().map_err(poisoned)?;
        if products.iter().any(|p| p.id == product.id) {
            return Err(CatalogError::AlreadyExists(product.id.to_string()));
        }
        products.push(product.clone());
        Ok(())
    }

    fn update(&self, product: &Product) -> CatalogResult<()> {
        let mut products = self.products.write().map_err(poisoned)?;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(CatalogError::not_found(product.id)),
        }
    }

    fn delete(&self, id: Uuid) -> CatalogResult<()> {
        let mut products = self.products.write().map_err(poisoned)?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(CatalogError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogFallback for InMemoryCatalog {
    async fn find_by_name_substring(&self, pattern: &str) -> Result<Vec<IndexedProduct>, FallbackError> {
        let products = CatalogRepository::find_by_name_substring(self, pattern)?;
        Ok(products.iter().map(Product::to_indexed).collect())
    }
}
