//! # Catalog Errors
//!
//! Error types for the product catalog.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Product catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Product details failed validation
    #[error("Invalid product details: {0}")]
    Validation(String),

    /// Product does not exist
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Product id already taken
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    /// Caller does not own the product
    #[error("Only the product creator can {0} this product")]
    Forbidden(String),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Seed file could not be read or parsed
    #[error("Seed error: {0}")]
    SeedError(String),
}

impl CatalogError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::SeedError(_) => "SEED_ERROR",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::AlreadyExists(_) => 409,
            Self::StorageError(_) | Self::SeedError(_) => 500,
        }
    }
}
