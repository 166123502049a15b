//! # HTTP Server Module
//!
//! Axum API server for the storefront.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/autocomplete` - Prefix suggestions
//! - `/products` - Catalog reads and owner-only writes
//! - `/observability/metrics` - Counter snapshot

mod config;
mod errors;
mod observability_routes;
mod product_routes;
mod search_routes;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use product_routes::ProductListResponse;
pub use search_routes::{AutocompleteParams, AutocompleteResponse};
pub use server::HttpServer;
