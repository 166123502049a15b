//! Seed data loading
//!
//! A seed file is a JSON array of products. Missing ids, owners and
//! timestamps are filled in with defaults.

use std::fs;
use std::path::Path;

use super::errors::{CatalogError, CatalogResult};
use super::product::Product;

/// Read and parse a seed file.
pub fn load_seed(path: &Path) -> CatalogResult<Vec<Product>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CatalogError::SeedError(format!("{}: {}", path.display(), e)))?;
    parse_seed(&raw)
}

/// Parse seed JSON, normalizing category and type to lowercase.
pub fn parse_seed(raw: &str) -> CatalogResult<Vec<Product>> {
    let mut products: Vec<Product> =
        serde_json::from_str(raw).map_err(|e| CatalogError::SeedError(e.to_string()))?;
    for product in &mut products {
        product.name = product.name.trim().to_string();
        product.category = product.category.trim().to_lowercase();
        product.product_type = product.product_type.trim().to_lowercase();
    }
    Ok(products)
}
