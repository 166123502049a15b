//! # Product Model
//!
//! Catalog product record, write input, and validation rules.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{CatalogError, CatalogResult};
use crate::search::IndexedProduct;

const MAX_DESCRIPTION_CHARS: usize = 500;

/// Product record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: f64,

    #[serde(default)]
    pub stock: i32,

    /// Lowercase category
    pub category: String,

    /// Lowercase product type
    #[serde(rename = "type")]
    pub product_type: String,

    pub image_url: String,

    /// Owner; only they may update or delete the product
    #[serde(default)]
    pub created_by: Uuid,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product owned by `owner` from validated input
    pub fn new(input: ProductInput, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            stock: input.stock,
            category: input.category.trim().to_lowercase(),
            product_type: input.product_type.trim().to_lowercase(),
            image_url: input.image_url.trim().to_string(),
            created_by: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields from validated input
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name.trim().to_string();
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock;
        self.category = input.category.trim().to_lowercase();
        self.product_type = input.product_type.trim().to_lowercase();
        self.image_url = input.image_url.trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Fields the autocomplete index is built from
    pub fn to_indexed(&self) -> IndexedProduct {
        IndexedProduct::new(
            self.id.to_string(),
            &self.name,
            &self.category,
            &self.product_type,
            &self.image_url,
        )
    }
}

/// Create/update request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub image_url: String,
}

impl ProductInput {
    /// Rules for new products: name longer than 3 characters
    pub fn validate_create(&self) -> CatalogResult<()> {
        self.validate(3)
    }

    /// Rules for updates: name longer than 2 characters
    pub fn validate_update(&self) -> CatalogResult<()> {
        self.validate(2)
    }

    fn validate(&self, min_name_exclusive: usize) -> CatalogResult<()> {
        if self.name.trim().chars().count() <= min_name_exclusive {
            return Err(CatalogError::validation(format!(
                "name must be longer than {} characters",
                min_name_exclusive
            )));
        }
        if !(self.price > 0.0) {
            return Err(CatalogError::validation("price must be greater than zero"));
        }
        if self.stock < 0 {
            return Err(CatalogError::validation("stock cannot be negative"));
        }
        if self.category.trim().is_empty() {
            return Err(CatalogError::validation("category cannot be empty"));
        }
        if self.product_type.trim().is_empty() {
            return Err(CatalogError::validation("type cannot be empty"));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(CatalogError::validation(format!(
                "description should not exceed {} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }
        if !image_url_pattern().is_match(self.image_url.trim()) {
            return Err(CatalogError::validation("invalid image URL"));
        }
        Ok(())
    }
}

fn image_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("image URL pattern is valid")
    })
}
