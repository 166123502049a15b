//! # Catalog
//!
//! Products as the system of record. Writes go through [`CatalogService`],
//! which keeps the autocomplete index in step after each commit.

mod errors;
mod product;
mod repository;
mod seed;
mod service;

pub use errors::{CatalogError, CatalogResult};
pub use product::{Product, ProductInput};
pub use repository::{CatalogRepository, InMemoryCatalog};
pub use seed::{load_seed, parse_seed};
pub use service::CatalogService;
