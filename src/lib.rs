//! storefront - marketplace catalog service with prefix autocomplete
//!
//! The catalog is the system of record. Every product write is mirrored into
//! a lexicographically sorted index of encoded prefix entries, which answers
//! autocomplete queries with a single range scan and falls back to a catalog
//! substring search when it cannot.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod search;
