//! Prefix-autocomplete index for storefront
//!
//! An in-memory, lexicographically sorted collection of encoded members
//! that answers "what products start with what the user typed" without
//! touching the catalog on the hot path.
//!
//! # Design Principles
//!
//! - Derived state: the catalog is the system of record, the index mirrors it
//! - Updates occur AFTER catalog writes and never fail them
//! - One atomic store command per insert-many, delete-matching, replace
//! - Deterministic: sorted members, first-seen de-duplication, no scoring
//!
//! # Data flow
//!
//! - write: `CatalogService` -> `Indexer` -> `IndexClient` -> `IndexStore`
//! - read: `AutocompleteService` -> `QueryEngine` -> `IndexClient` -> `IndexStore`,
//!   then `CatalogFallback` on a miss or outage

mod client;
mod config;
mod entry;
mod errors;
mod indexer;
mod prefix;
mod query;
mod service;
mod store;
mod types;

pub use client::IndexClient;
pub use config::IndexConfig;
pub use entry::{decode_product_id, escape, prefix_range, unescape, IndexEntry};
pub use errors::{SearchError, SearchResult};
pub use indexer::Indexer;
pub use prefix::{field_combinations, generate_prefixes, normalize_field, normalize_query, product_prefixes};
pub use query::QueryEngine;
pub use service::{AutocompleteService, CatalogFallback, FallbackError};
pub use store::{IndexStore, LexRange, MemoryIndexStore, ProductPredicate};
pub use types::{IndexedProduct, SearchOutcome, Suggestion, SuggestionSource};
